use std::sync::Arc;

use catalog_cell::{ProviderCatalog, StaticCatalog};
use queue_cell::*;
use shared_database::{AppointmentStore, InMemoryAppointmentStore};
use shared_models::appointment::{Appointment, PartitionKey};
use shared_utils::test_utils::TestConfig;

pub const DAY: &str = "2025-03-01";

/// Queue service over a fresh in-memory store and the seeded catalog.
pub struct QueueTestHarness {
    pub service: Arc<QueueService>,
    pub store: Arc<InMemoryAppointmentStore>,
}

impl QueueTestHarness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryAppointmentStore::new());
        Self::with_store(store)
    }

    pub fn with_store(store: Arc<InMemoryAppointmentStore>) -> Self {
        let catalog: Arc<dyn ProviderCatalog> = Arc::new(StaticCatalog::seeded());
        let service = Arc::new(QueueService::new(
            store.clone(),
            catalog,
            &TestConfig::default().to_app_config(),
        ));
        Self { service, store }
    }

    pub async fn book(&self, provider_id: &str, date: &str, customer_id: &str) -> Appointment {
        self.service
            .create_appointment(draft(provider_id, date, customer_id))
            .await
            .expect("Failed to create appointment")
    }

    pub async fn partition(&self, provider_id: &str, date: &str) -> Vec<Appointment> {
        self.store
            .load_partition(&PartitionKey::new(provider_id, date))
            .await
            .expect("Failed to load partition")
    }

    /// Active positions in creation order.
    pub async fn active_positions(&self, provider_id: &str, date: &str) -> Vec<u32> {
        self.partition(provider_id, date)
            .await
            .into_iter()
            .filter(|a| a.is_active())
            .map(|a| a.queue_position.expect("active appointment without position"))
            .collect()
    }

    pub async fn position_of(&self, appointment: &Appointment) -> Option<u32> {
        self.service
            .get_appointment(appointment.id)
            .await
            .expect("Failed to get appointment")
            .queue_position
    }
}

pub fn draft(provider_id: &str, date: &str, customer_id: &str) -> AppointmentDraft {
    let service_id = StaticCatalog::seeded()
        .services()
        .into_iter()
        .find(|s| s.providers.iter().any(|p| p.id == provider_id))
        .map(|s| s.id)
        .unwrap_or_else(|| "s0".to_string());

    AppointmentDraft {
        service_id,
        provider_id: provider_id.to_string(),
        customer_id: customer_id.to_string(),
        customer_name: format!("Customer {}", customer_id),
        date: date.to_string(),
        start_time: "09:00".to_string(),
        end_time: "09:30".to_string(),
    }
}

/// Active positions of a partition form exactly 1..=N.
pub fn assert_contiguous(mut positions: Vec<u32>) {
    positions.sort_unstable();
    let expected: Vec<u32> = (1..=positions.len() as u32).collect();
    assert_eq!(positions, expected, "queue positions are not contiguous");
}

mod concurrency_test;
mod projector_test;
mod properties_test;
