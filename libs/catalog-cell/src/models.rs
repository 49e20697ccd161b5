use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Minutes one appointment with this provider usually takes.
    pub average_wait_time: u32,
}

/// A bookable window offered to the booking flow. Slots never feed queue
/// positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub provider_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),
}
