use serde::{Deserialize, Serialize};

use shared_models::appointment::{AppointmentStatus, PartitionKey};

/// A booking request before the queue has placed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub service_id: String,
    pub provider_id: String,
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl AppointmentDraft {
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(&self.provider_id, &self.date)
    }
}

/// Queue-facing state shown to a polling customer. Not the same set as
/// `AppointmentStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueStatus {
    Waiting,
    InProgress,
    Ready,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueInfo {
    pub position: u32,
    pub estimated_wait_time: u32,
    pub appointments_ahead: u32,
    pub status: QueueStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    pub total_appointments: u32,
    pub completed_appointments: u32,
    pub no_shows: u32,
    pub average_wait_time: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub service_id: String,
    pub provider_id: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}
