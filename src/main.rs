use diesel_migrations::MigrationHarness;
use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub mod bots;
pub mod config;
pub mod http_server;

use crate::bots::bot_service::BotService;
use crate::config::AppConfig;
use crate::http_server::{run_http_server, AppState};
use dersbot::db::create_pool;
use dersbot::MIGRATIONS;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pool = Arc::new(create_pool(&config.database_url)?);

    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run database migrations: {e}"))?;
    drop(conn);

    tracing::info!("Database schema is up to date");

    let bot = BotService::new(&config.bot_token);

    run_http_server(AppState { pool, config, bot }).await?;

    Ok(())
}
