use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::appointment::{Appointment, PartitionKey};

use crate::state::StoreState;
use crate::store::{AppointmentStore, StoreError};

/// Store backed by a single JSON document holding every appointment.
///
/// Each write serializes the next state to a sibling temp file and renames it
/// over the data file. The in-memory state only advances once the rename has
/// succeeded.
#[derive(Debug)]
pub struct JsonFileAppointmentStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileAppointmentStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let records: Vec<Appointment> = match fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await?;
                }
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loaded {} appointments from {}", records.len(), path.display());

        Ok(Self {
            path,
            state: RwLock::new(StoreState::from_records(records)?),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, state: &StoreState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state.records())?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!("Flushed {} appointments to {}", state.records().len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for JsonFileAppointmentStore {
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
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        next.upsert_partition(key, appointments)?;
        self.flush(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn replace_all(&self, appointments: Vec<Appointment>) -> Result<(), StoreError> {
        let mut guard = self.state.write().await;
        let next = StoreState::from_records(appointments)?;
        self.flush(&next).await?;
        *guard = next;
        Ok(())
    }
}
