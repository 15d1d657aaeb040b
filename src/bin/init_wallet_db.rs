//! Initialize the wallet ledger schema.
//!
//! Usage: init_wallet_db [env]   (env defaults to "dev", reads config/{env}.yaml)

use anyhow::Context;
use zippay::config::AppConfig;
use zippay::db::Database;
use zippay::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::args().nth(1).unwrap_or_else(|| "dev".to_string());
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;
    db.init_schema().await.context("failed to apply schema")?;
    db.health_check().await.context("health check failed")?;

    tracing::info!("wallet ledger ready at {}", config.database.url);
    Ok(())
}
