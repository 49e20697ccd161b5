use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use shared_models::appointment::{Appointment, PartitionKey};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Appointment {id} does not belong to partition {expected}")]
    PartitionMismatch { id: Uuid, expected: PartitionKey },

    #[error("Corrupt appointment data: {0}")]
    Corrupt(String),
}

/// Durable home of appointment records.
///
/// Reads return snapshots taken under a single guard, so every record of a
/// partition comes from the same committed state. `save_partition` upserts
/// all given records of one partition as a single write: either every record
/// lands or none does.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn load_partition(&self, key: &PartitionKey) -> Result<Vec<Appointment>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    async fn save_partition(
        &self,
        key: &PartitionKey,
        appointments: Vec<Appointment>,
    ) -> Result<(), StoreError>;

    async fn replace_all(&self, appointments: Vec<Appointment>) -> Result<(), StoreError>;
}
