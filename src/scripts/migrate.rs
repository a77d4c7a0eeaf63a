use anyhow::{Context, Result};
use planet_service::config::AppConfig;
use planet_service::PostgresStore;

/// Apply pending schema migrations and exit.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let database_url = config.database_url()?;
    let store = PostgresStore::connect(&database_url, &config.database).await?;

    println!("Connected to database. Applying migrations...");
    store
        .migrate()
        .await
        .context("Failed to run database migrations")?;
    println!("Migration complete.");

    Ok(())
}
