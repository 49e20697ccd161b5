use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use catalog_cell::{ProviderCatalog, StaticCatalog};
use queue_cell::QueueService;
use shared_config::AppConfig;
use shared_database::{AppointmentStore, InMemoryAppointmentStore, JsonFileAppointmentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting queue API server");

    let config = Arc::new(AppConfig::from_env());

    let store: Arc<dyn AppointmentStore> = match &config.queue_data_file {
        Some(path) => {
            let store = JsonFileAppointmentStore::open(path)
                .await
                .with_context(|| format!("opening appointment store at {}", path.display()))?;
            info!("Persisting appointments to {}", store.path().display());
            Arc::new(store)
        }
        None => Arc::new(InMemoryAppointmentStore::new()),
    };
    let catalog: Arc<dyn ProviderCatalog> = Arc::new(StaticCatalog::seeded());
    let service = Arc::new(QueueService::new(store, catalog.clone(), &config));

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router::create_router(config.clone(), catalog, service)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
