use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::CatalogError;
use crate::services::{ProviderCatalog, TimeSlotService};

pub struct CatalogHandlers {
    pub catalog: Arc<dyn ProviderCatalog>,
    pub slots: TimeSlotService,
}

impl CatalogHandlers {
    pub fn new(catalog: Arc<dyn ProviderCatalog>) -> Self {
        Self {
            catalog,
            slots: TimeSlotService::new(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::NotFound(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub from: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn list_services(
    State(handlers): State<Arc<CatalogHandlers>>,
) -> Result<Json<Value>, AppError> {
    let services = handlers.catalog.services();

    Ok(Json(json!({
        "services": services,
        "total": services.len()
    })))
}

#[axum::debug_handler]
pub async fn get_service(
    State(handlers): State<Arc<CatalogHandlers>>,
    Path(service_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = handlers
        .catalog
        .service(&service_id)
        .ok_or(CatalogError::ServiceNotFound(service_id))?;

    Ok(Json(json!(service)))
}

#[axum::debug_handler]
pub async fn list_service_providers(
    State(handlers): State<Arc<CatalogHandlers>>,
    Path(service_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if handlers.catalog.service(&service_id).is_none() {
        return Err(CatalogError::ServiceNotFound(service_id).into());
    }

    let providers = handlers.catalog.providers_by_service(&service_id);

    Ok(Json(json!({
        "providers": providers,
        "total": providers.len()
    })))
}

#[axum::debug_handler]
pub async fn get_provider_slots(
    State(handlers): State<Arc<CatalogHandlers>>,
    Path(provider_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    if handlers.catalog.provider(&provider_id).is_none() {
        return Err(CatalogError::ProviderNotFound(provider_id).into());
    }

    let from = query.from.unwrap_or_else(|| Utc::now().date_naive());
    let slots = handlers.slots.available_slots(&provider_id, from);
    debug!("Generated {} slots for provider {} from {}", slots.len(), provider_id, from);

    Ok(Json(json!({
        "providerId": provider_id,
        "slots": slots,
        "total": slots.len()
    })))
}
