use std::sync::Arc;

use crate::config::Config;
use crate::ranking::LlmClient;
use crate::sheets::SheetSource;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// No mutable state lives here: every request rebuilds its table from the
/// source spreadsheet, so concurrent requests never contend over data.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetSource>,
    pub llm: LlmClient,
    pub config: Config,
}
