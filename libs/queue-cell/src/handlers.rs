use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use shared_models::auth::{User, UserRole};
use shared_models::error::AppError;

use crate::models::{AppointmentDraft, CreateAppointmentRequest, UpdateStatusRequest};
use crate::services::QueueService;

/// Book an appointment and place it in its provider's queue for the day
#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<QueueService>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    info!("Booking request from user: {}", user.id);

    if request.provider_id.trim().is_empty() || request.date.trim().is_empty() {
        return Err(AppError::BadRequest("providerId and date are required".to_string()));
    }

    let draft = AppointmentDraft {
        service_id: request.service_id,
        provider_id: request.provider_id,
        customer_id: request.customer_id.unwrap_or_else(|| user.id.clone()),
        customer_name: request.customer_name.unwrap_or_else(|| user.display_name()),
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
    };

    let appointment = service.create_appointment(draft).await?;

    Ok(Json(json!(appointment)))
}

/// Appointments of the calling customer, or of the calling provider
#[axum::debug_handler]
pub async fn list_my_appointments(
    State(service): State<Arc<QueueService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let appointments = match user.user_role() {
        Some(UserRole::Provider) => service.list_by_provider(&user.id).await?,
        _ => service.list_by_customer(&user.id).await?,
    };

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn list_customer_appointments(
    State(service): State<Arc<QueueService>>,
    Extension(user): Extension<User>,
    Path(customer_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!("Customer {} appointments requested by user: {}", customer_id, user.id);

    let appointments = service.list_by_customer(&customer_id).await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn list_provider_appointments(
    State(service): State<Arc<QueueService>>,
    Extension(user): Extension<User>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!("Provider {} appointments requested by user: {}", provider_id, user.id);

    let appointments = service.list_by_provider(&provider_id).await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_provider_stats(
    State(service): State<Arc<QueueService>>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let stats = service.provider_stats(&provider_id).await?;

    Ok(Json(json!(stats)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<QueueService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_status(
    State(service): State<Arc<QueueService>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    info!(
        "Status change to {} for appointment {} from user: {}",
        request.status, appointment_id, user.id
    );

    let appointment = service.set_status(appointment_id, request.status).await?;

    Ok(Json(json!(appointment)))
}

/// Polled by waiting customers
#[axum::debug_handler]
pub async fn get_queue_info(
    State(service): State<Arc<QueueService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let info = service.get_queue_info(appointment_id).await?;

    Ok(Json(json!(info)))
}
