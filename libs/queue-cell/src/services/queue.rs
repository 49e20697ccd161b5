use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use catalog_cell::ProviderCatalog;
use shared_config::AppConfig;
use shared_database::AppointmentStore;
use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::error::QueueError;
use crate::models::{AppointmentDraft, ProviderStats, QueueInfo};
use crate::services::{
    assignment::QueueAssignmentEngine, locks::PartitionLocks, projector::QueueInfoProjector,
    transition::StatusTransitionValidator,
};

/// Entry point for callers. Holds no appointment state of its own: every
/// operation goes through the store.
pub struct QueueService {
    store: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn ProviderCatalog>,
    engine: QueueAssignmentEngine,
    validator: StatusTransitionValidator,
    projector: QueueInfoProjector,
}

impl QueueService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn ProviderCatalog>,
        config: &AppConfig,
    ) -> Self {
        let locks = Arc::new(PartitionLocks::new());

        Self {
            engine: QueueAssignmentEngine::new(
                store.clone(),
                catalog.clone(),
                locks.clone(),
                config.default_average_wait_minutes,
            ),
            validator: StatusTransitionValidator::new(store.clone(), locks),
            projector: QueueInfoProjector::new(
                store.clone(),
                catalog.clone(),
                config.default_average_wait_minutes,
            ),
            store,
            catalog,
        }
    }

    pub async fn create_appointment(
        &self,
        draft: AppointmentDraft,
    ) -> Result<Appointment, QueueError> {
        info!(
            "Booking for customer {} with provider {} on {}",
            draft.customer_id, draft.provider_id, draft.date
        );
        self.engine.assign(draft).await
    }

    pub async fn set_status(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, QueueError> {
        self.validator.set_status(appointment_id, status).await
    }

    pub async fn get_queue_info(&self, appointment_id: Uuid) -> Result<QueueInfo, QueueError> {
        self.projector.project(appointment_id).await
    }

    pub async fn get_appointment(&self, appointment_id: Uuid) -> Result<Appointment, QueueError> {
        self.store
            .find(appointment_id)
            .await?
            .ok_or_else(|| QueueError::NotFound(format!("appointment {}", appointment_id)))
    }

    pub async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Appointment>, QueueError> {
        Ok(self
            .store
            .load_all()
            .await?
            .into_iter()
            .filter(|a| a.customer_id == customer_id)
            .collect())
    }

    pub async fn list_by_provider(&self, provider_id: &str) -> Result<Vec<Appointment>, QueueError> {
        Ok(self
            .store
            .load_all()
            .await?
            .into_iter()
            .filter(|a| a.provider_id == provider_id)
            .collect())
    }

    pub async fn provider_stats(&self, provider_id: &str) -> Result<ProviderStats, QueueError> {
        let average_wait_time = self
            .catalog
            .average_wait_time(provider_id)
            .ok_or_else(|| QueueError::NotFound(format!("provider {}", provider_id)))?;

        let appointments = self.list_by_provider(provider_id).await?;
        let count = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count() as u32
        };

        Ok(ProviderStats {
            total_appointments: appointments.len() as u32,
            completed_appointments: count(AppointmentStatus::Completed),
            no_shows: count(AppointmentStatus::NoShow),
            average_wait_time,
        })
    }
}
