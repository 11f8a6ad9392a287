mod config;
mod curation;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::taxonomy::store::PgTaxonomyStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("curator_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Curator API v{}", env!("CARGO_PKG_VERSION"));

    // Taxonomy warehouse
    let db = create_pool(&config.database_url).await?;
    let taxonomy = PgTaxonomyStore::new(db, config.queries.clone());

    // Classifier
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.llm_max_retries,
        Duration::from_millis(config.llm_backoff_ms),
    )?
    .with_base_url(&config.openai_base_url);
    info!(
        "LLM client initialized (fast: {}, quality: {}, max retries: {})",
        llm_client::FAST_MODEL,
        llm_client::QUALITY_MODEL,
        config.llm_max_retries
    );
    info!(
        "Curation settings: concurrency={}, max_candidates={}, min_enrollment={}",
        config.curation.concurrency, config.curation.max_candidates, config.curation.min_enrollment
    );

    let state = AppState {
        taxonomy: Arc::new(taxonomy),
        classifier: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
