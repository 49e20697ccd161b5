use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_models::appointment::{Appointment, PartitionKey};

use crate::state::StoreState;
use crate::store::{AppointmentStore, StoreError};

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    state: RwLock<StoreState>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Result<Self, StoreError> {
        Ok(Self {
            state: RwLock::new(StoreState::from_records(appointments)?),
        })
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn load_all(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.state.read().await.records().to_vec())
    }

    async fn load_partition(&self, key: &PartitionKey) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.state.read().await.partition(key))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.state.read().await.find(id))
    }

    async fn save_partition(
        &self,
        key: &PartitionKey,
        appointments: Vec<Appointment>,
    ) -> Result<(), StoreError> {
        let count = appointments.len();
        self.state.write().await.upsert_partition(key, appointments)?;
        debug!("Saved {} appointments in partition {}", count, key);
        Ok(())
    }

    async fn replace_all(&self, appointments: Vec<Appointment>) -> Result<(), StoreError> {
        let next = StoreState::from_records(appointments)?;
        *self.state.write().await = next;
        Ok(())
    }
}
