use thiserror::Error;

use shared_database::StoreError;
use shared_models::appointment::AppointmentStatus;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

impl From<QueueError> for AppError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::NotFound(_) => AppError::NotFound(e.to_string()),
            QueueError::InvalidTransition { .. } => AppError::Conflict(e.to_string()),
            QueueError::StoreFailure(_) => AppError::Storage(e.to_string()),
        }
    }
}
