use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use catalog_cell::ProviderCatalog;
use shared_database::AppointmentStore;
use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::error::QueueError;
use crate::models::AppointmentDraft;
use crate::services::locks::PartitionLocks;

/// Minutes taken off each sibling's stored estimate when someone ahead of it
/// leaves the queue. Deliberately a fixed slot, not the provider's average.
pub const RECOMPUTE_SLOT_MINUTES: u32 = 15;

/// Places new appointments at the back of their queue and closes the gap
/// when one leaves.
pub struct QueueAssignmentEngine {
    store: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn ProviderCatalog>,
    locks: Arc<PartitionLocks>,
    fallback_average_wait: u32,
}

impl QueueAssignmentEngine {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn ProviderCatalog>,
        locks: Arc<PartitionLocks>,
        fallback_average_wait: u32,
    ) -> Self {
        Self {
            store,
            catalog,
            locks,
            fallback_average_wait,
        }
    }

    pub async fn assign(&self, draft: AppointmentDraft) -> Result<Appointment, QueueError> {
        // Names are resolved within the booked service only.
        let service = self.catalog.service(&draft.service_id);
        let provider = service
            .as_ref()
            .and_then(|service| service.providers.iter().find(|p| p.id == draft.provider_id));

        let (provider_name, average_wait_time) = match provider {
            Some(provider) => (provider.name.clone(), provider.average_wait_time),
            None => {
                warn!(
                    "Provider {} not offered by service {}, seeding {} minutes",
                    draft.provider_id, draft.service_id, self.fallback_average_wait
                );
                (String::new(), self.fallback_average_wait)
            }
        };
        let service_name = service.map(|service| service.name).unwrap_or_default();

        let key = draft.partition_key();
        let _guard = self.locks.lock(&key).await;

        let partition = self.store.load_partition(&key).await?;
        let active = partition.iter().filter(|a| a.is_active()).count() as u32;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            service_id: draft.service_id,
            service_name,
            provider_id: draft.provider_id,
            provider_name,
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            status: AppointmentStatus::Scheduled,
            queue_position: Some(active + 1),
            estimated_wait_time: Some(seed_wait_time(average_wait_time)),
            created_at: Utc::now(),
        };

        self.store
            .save_partition(&key, vec![appointment.clone()])
            .await?;

        info!(
            "Appointment {} queued at position {} in {}",
            appointment.id,
            active + 1,
            key
        );
        Ok(appointment)
    }

    /// Shifts every active sibling behind `appointment_id` up by one place
    /// and trims its stored estimate. Works on a snapshot the caller already
    /// holds the partition lock for; the caller persists the result.
    ///
    /// Returns how many siblings moved.
    pub fn on_terminal_transition(
        partition: &mut [Appointment],
        appointment_id: Uuid,
    ) -> Result<usize, QueueError> {
        let departed = partition
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| QueueError::NotFound(format!("appointment {}", appointment_id)))?;

        // Without a former position there is no gap to close.
        let Some(former) = departed.queue_position else {
            return Ok(0);
        };

        let mut shifted = 0;
        for sibling in partition
            .iter_mut()
            .filter(|a| a.id != appointment_id && a.is_active())
        {
            match sibling.queue_position {
                Some(position) if position > former => {
                    sibling.queue_position = Some(position - 1);
                    sibling.estimated_wait_time = sibling.estimated_wait_time.map(reduce_wait_time);
                    shifted += 1;
                }
                _ => {}
            }
        }

        debug!(
            "Closed gap at position {} left by {}: {} appointments moved up",
            former, appointment_id, shifted
        );
        Ok(shifted)
    }
}

/// Estimate stored on a brand new appointment: one provider average,
/// whatever the position.
pub fn seed_wait_time(average_wait_time: u32) -> u32 {
    average_wait_time
}

/// Never takes an estimate below one recompute slot.
pub fn reduce_wait_time(current: u32) -> u32 {
    if current > RECOMPUTE_SLOT_MINUTES {
        current - RECOMPUTE_SLOT_MINUTES
    } else {
        current
    }
}
