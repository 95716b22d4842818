//! Election API server: loads settings from the environment, ensures the database and tables exist,
//! and serves the `/api` routes plus health/readiness.

use election_api::{app, ensure_database_exists, ensure_tables, AppState, PgStore, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("election_api=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await?;
    tracing::info!("database connected");
    ensure_tables(&pool).await?;

    let state = AppState::new(Arc::new(PgStore::new(pool, config.store_timeout)));
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
