use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, CatalogHandlers};
use crate::services::ProviderCatalog;

/// Catalog lookups are public; nothing here needs a caller identity.
pub fn catalog_routes(catalog: Arc<dyn ProviderCatalog>) -> Router {
    let handlers = Arc::new(CatalogHandlers::new(catalog));

    Router::new()
        .route("/services", get(handlers::list_services))
        .route("/services/{service_id}", get(handlers::get_service))
        .route("/services/{service_id}/providers", get(handlers::list_service_providers))
        .route("/providers/{provider_id}/slots", get(handlers::get_provider_slots))
        .with_state(handlers)
}
