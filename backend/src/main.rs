//! Agritech Hub - Backend Server
//!
//! Agricultural assistance API: crop recommendations from weather and soil
//! estimates, leaf disease classification, a community forum, government
//! schemes and a multilingual voice assistant.

use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod classifier;
mod config;
mod error;
mod external;
mod extract;
mod handlers;
mod routes;
mod services;
mod store;

pub use config::Config;

use classifier::{DiseaseClassifier, TractLoader};
use external::ExternalClients;
use store::{MemoryStore, PgStore, Store};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub classifier: Arc<DiseaseClassifier>,
    pub clients: ExternalClients,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "agritech_server=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Agritech Hub Server");
    tracing::info!("Environment: {}", config.environment);

    let store = connect_store(&config).await?;

    if config.llm.api_key.is_none() {
        tracing::warn!("LLM API key is missing; the voice endpoint will return fallbacks");
    }

    // Create application state
    let state = AppState {
        store,
        classifier: Arc::new(DiseaseClassifier::new(Arc::new(TractLoader::new(
            &config.classifier.model_path,
        )))),
        clients: ExternalClients::from_config(&config)?,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = routes::create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL when a database URL is configured, otherwise the in-memory store
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("No database URL configured; using the in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.is_development() {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    Ok(Arc::new(PgStore::new(db_pool)))
}
