//! Spreadsheet source — the external collaborator that owns competency data.
//!
//! The core only needs two operations: list a spreadsheet's sheet titles and
//! fetch a sheet's raw cell grid. Everything behind that (bulk export vs
//! per-cell query, auth) is the source's business, so the seam is a trait
//! and handlers hold an `Arc<dyn SheetSource>`.

pub mod google;

use async_trait::async_trait;
use thiserror::Error;

use crate::table::Grid;

#[derive(Debug, Error)]
pub enum SheetError {
    /// The spreadsheet or sheet does not exist, or the service account has
    /// no access to it. Surfaced to the user as-is; nothing partial follows.
    #[error("spreadsheet or sheet not found: {0}")]
    NotFound(String),

    /// The backend API itself errored (rate limit, transient fault).
    /// Surfaced verbatim, never retried here.
    #[error("spreadsheet service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Titles of all sheets inside the spreadsheet, in document order.
    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, SheetError>;

    /// The raw cell grid of one sheet. Rows may be ragged — trailing empty
    /// cells are simply absent.
    async fn grid(&self, spreadsheet_id: &str, sheet_title: &str) -> Result<Grid, SheetError>;
}
