mod config;
mod errors;
mod ranking;
mod routes;
mod selection;
mod sheets;
mod state;
mod table;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ranking::LlmClient;
use crate::routes::build_router;
use crate::sheets::google::GoogleSheetsSource;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillrank API v{}", env!("CARGO_PKG_VERSION"));

    // Spreadsheet source
    let sheets = Arc::new(GoogleSheetsSource::new(config.sheets_api_key.clone()));
    info!(
        "Sheets source initialized ({} departments)",
        config.departments.len()
    );

    // Ranking model client
    let llm = LlmClient::new(
        config.openai_api_base.clone(),
        config.openai_api_key.clone(),
        config.model_name.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        sheets,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
