use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::AppointmentStore;
use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::error::QueueError;
use crate::services::assignment::QueueAssignmentEngine;
use crate::services::locks::PartitionLocks;

pub struct StatusTransitionValidator {
    store: Arc<dyn AppointmentStore>,
    locks: Arc<PartitionLocks>,
}

impl StatusTransitionValidator {
    pub fn new(store: Arc<dyn AppointmentStore>, locks: Arc<PartitionLocks>) -> Self {
        Self { store, locks }
    }

    /// Statuses reachable in one step. Terminal statuses reach nothing.
    pub fn valid_transitions(current: AppointmentStatus) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match current {
            Scheduled => &[InProgress, Cancelled, NoShow],
            InProgress => &[Completed, NoShow],
            Completed | Cancelled | NoShow => &[],
        }
    }

    pub fn validate(current: AppointmentStatus, next: AppointmentStatus) -> Result<(), QueueError> {
        if !Self::valid_transitions(current).contains(&next) {
            warn!("Invalid status transition attempted: {} -> {}", current, next);
            return Err(QueueError::InvalidTransition {
                from: current,
                to: next,
            });
        }
        Ok(())
    }

    /// Applies a status change. Leaving the active set also closes the gap
    /// behind the appointment; both land in the same partition write.
    pub async fn set_status(
        &self,
        appointment_id: Uuid,
        next: AppointmentStatus,
    ) -> Result<Appointment, QueueError> {
        let key = self
            .store
            .find(appointment_id)
            .await?
            .ok_or_else(|| QueueError::NotFound(format!("appointment {}", appointment_id)))?
            .partition_key();

        let _guard = self.locks.lock(&key).await;

        // Positions may have moved since the lookup above.
        let mut partition = self.store.load_partition(&key).await?;
        let index = partition
            .iter()
            .position(|a| a.id == appointment_id)
            .ok_or_else(|| QueueError::NotFound(format!("appointment {}", appointment_id)))?;

        let current = partition[index].status;
        Self::validate(current, next)?;

        partition[index].status = next;
        let updated = partition[index].clone();

        if next.is_terminal() {
            QueueAssignmentEngine::on_terminal_transition(&mut partition, appointment_id)?;
        }

        self.store.save_partition(&key, partition).await?;

        info!("Appointment {} moved from {} to {}", appointment_id, current, next);
        debug!("Partition {} rewritten after status change", key);
        Ok(updated)
    }
}
