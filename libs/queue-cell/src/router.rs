use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::QueueService;

pub fn queue_routes(config: Arc<AppConfig>, service: Arc<QueueService>) -> Router {
    // All appointment operations require authentication
    let protected_routes = Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/mine", get(handlers::list_my_appointments))
        .route("/customers/{customer_id}", get(handlers::list_customer_appointments))
        .route("/providers/{provider_id}", get(handlers::list_provider_appointments))
        .route("/providers/{provider_id}/stats", get(handlers::get_provider_stats))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/status", patch(handlers::update_status))
        .route("/{appointment_id}/queue", get(handlers::get_queue_info))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(service)
}
