pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;
pub mod strings;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export the operations
pub use logic::{PlanetAdmin, PlanetUser, RpcResponse, Validate};

// Export all model types
pub use model::*;

// Export store types
pub use store::{InMemoryStore, PostgresStore, Store, StoreError};

/// Connect to Postgres, migrate when configured to, and serve until the
/// listener stops.
pub async fn run_server(config: config::AppConfig) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    let database_url = config.database_url()?;
    let store = PostgresStore::connect(&database_url, &config.database).await?;

    if config.database.run_migrations {
        log::info!("Running database migrations...");
        store
            .migrate()
            .await
            .context("Failed to run database migrations")?;
    }

    let app = routes::app(Arc::new(store));

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    log::info!("Planet service listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
