use std::sync::Arc;

use movie_collections::{
    config::{Config, CounterBackend, CredentialSource, StoreBackend},
    create_router,
    db::{self, MemoryStore, PgStore, RedisCounter, Store},
    services::{auth::TokenIssuer, AtomicCounter, CatalogClient, RequestCounter},
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database_url).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let counter: Arc<dyn RequestCounter> = match config.counter_backend {
        CounterBackend::Redis => {
            let client = db::create_redis_client(&config.redis_url)?;
            Arc::new(RedisCounter::connect(client).await?)
        }
        CounterBackend::Memory => Arc::new(AtomicCounter::new()),
    };

    let catalog = Arc::new(CatalogClient::from_config(&config)?);

    let state = AppState::new(
        store,
        counter,
        catalog,
        CredentialSource::Environment,
        TokenIssuer::from_config(&config),
    );

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
