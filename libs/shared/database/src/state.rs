use std::collections::HashMap;
use uuid::Uuid;

use shared_models::appointment::{Appointment, PartitionKey};

use crate::store::StoreError;

/// Appointments in creation order, indexed by id.
#[derive(Debug, Clone, Default)]
pub(crate) struct StoreState {
    records: Vec<Appointment>,
    index: HashMap<Uuid, usize>,
}

impl StoreState {
    pub(crate) fn from_records(records: Vec<Appointment>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, appointment) in records.iter().enumerate() {
            if index.insert(appointment.id, position).is_some() {
                return Err(StoreError::Corrupt(format!(
                    "duplicate appointment id {}",
                    appointment.id
                )));
            }
        }
        Ok(Self { records, index })
    }

    pub(crate) fn records(&self) -> &[Appointment] {
        &self.records
    }

    pub(crate) fn partition(&self, key: &PartitionKey) -> Vec<Appointment> {
        self.records
            .iter()
            .filter(|appointment| appointment.belongs_to(key))
            .cloned()
            .collect()
    }

    pub(crate) fn find(&self, id: Uuid) -> Option<Appointment> {
        self.index.get(&id).map(|&position| self.records[position].clone())
    }

    /// Checks every record before touching anything, so a rejected batch
    /// leaves the state unchanged.
    pub(crate) fn upsert_partition(
        &mut self,
        key: &PartitionKey,
        appointments: Vec<Appointment>,
    ) -> Result<(), StoreError> {
        if let Some(stray) = appointments.iter().find(|a| !a.belongs_to(key)) {
            return Err(StoreError::PartitionMismatch {
                id: stray.id,
                expected: key.clone(),
            });
        }

        for appointment in appointments {
            match self.index.get(&appointment.id) {
                Some(&position) => self.records[position] = appointment,
                None => {
                    self.index.insert(appointment.id, self.records.len());
                    self.records.push(appointment);
                }
            }
        }
        Ok(())
    }
}
