mod config;
mod errors;
mod export;
mod insights;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod surface;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::SvgRasterizer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone()).context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Font loading scans the system font directories; keep it off the runtime threads.
    let font_dir = config.font_dir.clone();
    let rasterizer = tokio::task::spawn_blocking(move || SvgRasterizer::new(font_dir.as_deref()))
        .await
        .context("Font loading task failed")?;

    let state = AppState::new(config.clone(), Arc::new(llm), Arc::new(rasterizer));
    info!(
        scale = state.export_settings.scale,
        jpeg_quality = state.export_settings.jpeg_quality,
        archive = ?config.export_archive_dir,
        "Export settings"
    );

    // Idle sessions are swept a few times per TTL window.
    let sweep_every = (config.session_ttl / 4).max(Duration::from_secs(1));
    state.sessions.spawn_sweeper(config.session_ttl, sweep_every);
    info!(ttl_secs = config.session_ttl.as_secs(), "Session expiry enabled");

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
