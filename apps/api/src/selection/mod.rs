//! Selection pipelines — wire the spreadsheet source through normalization,
//! cohort filtering and roster merging into ranking-ready tables.

pub mod handlers;
pub mod pipeline;
