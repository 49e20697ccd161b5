use std::sync::Arc;

use axum::{routing::get, Router};

use catalog_cell::{catalog_routes, ProviderCatalog};
use queue_cell::{queue_routes, QueueService};
use shared_config::AppConfig;

pub fn create_router(
    config: Arc<AppConfig>,
    catalog: Arc<dyn ProviderCatalog>,
    service: Arc<QueueService>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Queue API is running!" }))
        .nest("/catalog", catalog_routes(catalog))
        .nest("/appointments", queue_routes(config, service))
}
