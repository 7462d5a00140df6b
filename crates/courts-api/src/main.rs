use std::sync::Arc;

use anyhow::Context;
use courts_core::config::SearchConfig;
use courts_store::{FacilityStore, MemoryFacilityStore, PostgresConfig, PostgresStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courts_api::{create_router, with_middleware, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courts_api=info,courts_search=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let search = config.load_search_config().context("Invalid search configuration")?;

    tracing::info!(
        port = config.port,
        api_version = %config.api_version,
        "Starting Court Service API server"
    );
    for (key, (value, source)) in search.to_inspection_map() {
        tracing::info!(key = %key, value = %value, source = ?source, "Search setting");
    }

    let store = init_store(&config, &search).await?;
    let state = Arc::new(AppState::new(store, &search).context("Failed to build app state")?);

    let app = with_middleware(create_router(state, &config), &config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(origins = ?config.cors_origins, "CORS enabled");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// PostgreSQL when DATABASE_URL is set, in-memory otherwise
async fn init_store(
    config: &ApiConfig,
    search: &SearchConfig,
) -> anyhow::Result<Arc<dyn FacilityStore>> {
    let model = search.great_circle()?;

    match &config.database_url {
        Some(database_url) => {
            tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
            let pg_config =
                PostgresConfig::from_database_url(database_url).context("Invalid DATABASE_URL")?;
            let store = PostgresStore::connect(pg_config, model).await.context(
                "Failed to connect to PostgreSQL; check that it is running and DATABASE_URL is correct",
            )?;
            tracing::info!("Connected to PostgreSQL");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("Using in-memory storage (set DATABASE_URL for PostgreSQL)");
            Ok(Arc::new(MemoryFacilityStore::with_model(model)))
        }
    }
}
