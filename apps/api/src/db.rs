use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates the connection pool for the taxonomy warehouse. The pipeline only reads,
/// four queries per run, so a small pool is enough.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to taxonomy warehouse...");

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url)
        .await
        .context("Failed to connect to the taxonomy warehouse")?;

    info!("Taxonomy warehouse connection pool established");
    Ok(pool)
}
