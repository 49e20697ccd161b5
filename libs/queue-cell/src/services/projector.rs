use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use catalog_cell::ProviderCatalog;
use shared_database::AppointmentStore;
use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::error::QueueError;
use crate::models::{QueueInfo, QueueStatus};

/// Read side of the queue. Computes everything from one partition snapshot
/// and never writes.
pub struct QueueInfoProjector {
    store: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn ProviderCatalog>,
    fallback_average_wait: u32,
}

impl QueueInfoProjector {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn ProviderCatalog>,
        fallback_average_wait: u32,
    ) -> Self {
        Self {
            store,
            catalog,
            fallback_average_wait,
        }
    }

    pub async fn project(&self, appointment_id: Uuid) -> Result<QueueInfo, QueueError> {
        let key = self
            .store
            .find(appointment_id)
            .await?
            .ok_or_else(|| QueueError::NotFound(format!("appointment {}", appointment_id)))?
            .partition_key();

        let partition = self.store.load_partition(&key).await?;
        let appointment = partition
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| QueueError::NotFound(format!("appointment {}", appointment_id)))?;

        let average = self
            .catalog
            .average_wait_time(&appointment.provider_id)
            .unwrap_or_else(|| {
                warn!(
                    "Provider {} missing from catalog, assuming {} minutes per appointment",
                    appointment.provider_id, self.fallback_average_wait
                );
                self.fallback_average_wait
            });

        let info = project_snapshot(appointment, &partition, average);
        debug!("Queue info for {}: {:?}", appointment_id, info);
        Ok(info)
    }
}

/// Projects one appointment against a snapshot of its partition.
///
/// Terminal appointments report position 0: whatever position they last
/// held is history and says nothing about the live queue.
pub fn project_snapshot(
    appointment: &Appointment,
    partition: &[Appointment],
    average_wait_time: u32,
) -> QueueInfo {
    let position = if appointment.is_active() {
        appointment.queue_position.unwrap_or(0)
    } else {
        0
    };

    let appointments_ahead = partition
        .iter()
        .filter(|other| other.id != appointment.id && other.is_active())
        .filter(|other| other.queue_position.unwrap_or(0) < position)
        .count() as u32;

    QueueInfo {
        position,
        estimated_wait_time: query_wait_time(appointments_ahead, average_wait_time),
        appointments_ahead,
        status: queue_status(appointment.status, appointments_ahead),
    }
}

/// Estimate shown to a polling customer: a full provider average for every
/// appointment still ahead.
pub fn query_wait_time(appointments_ahead: u32, average_wait_time: u32) -> u32 {
    appointments_ahead * average_wait_time
}

fn queue_status(status: AppointmentStatus, appointments_ahead: u32) -> QueueStatus {
    match status {
        AppointmentStatus::Completed => QueueStatus::Completed,
        AppointmentStatus::InProgress => QueueStatus::InProgress,
        AppointmentStatus::Scheduled if appointments_ahead == 0 => QueueStatus::Ready,
        _ => QueueStatus::Waiting,
    }
}
