use std::sync::Arc;

use assert_matches::assert_matches;
use uuid::Uuid;

use catalog_cell::{ProviderCatalog, StaticCatalog};
use queue_cell::*;
use shared_database::{AppointmentStore, InMemoryAppointmentStore};
use shared_models::appointment::{AppointmentStatus, PartitionKey};
use shared_utils::test_utils::TestConfig;

use super::{draft, QueueTestHarness, DAY};

#[tokio::test]
async fn test_queue_info_after_head_completes() {
    let harness = QueueTestHarness::new();
    let a = harness.book("p1", DAY, "c1").await;
    let b = harness.book("p1", DAY, "c2").await;
    let c = harness.book("p1", DAY, "c3").await;

    harness
        .service
        .set_status(a.id, AppointmentStatus::InProgress)
        .await
        .unwrap();
    harness
        .service
        .set_status(a.id, AppointmentStatus::Completed)
        .await
        .unwrap();

    let info = harness.service.get_queue_info(b.id).await.unwrap();
    assert_eq!(
        info,
        QueueInfo {
            position: 1,
            estimated_wait_time: 0,
            appointments_ahead: 0,
            status: QueueStatus::Ready,
        }
    );

    let info = harness.service.get_queue_info(c.id).await.unwrap();
    assert_eq!(info.position, 2);
    assert_eq!(info.appointments_ahead, 1);
    assert_eq!(info.estimated_wait_time, 15);
    assert_eq!(info.status, QueueStatus::Waiting);

    let info = harness.service.get_queue_info(a.id).await.unwrap();
    assert_eq!(info.status, QueueStatus::Completed);
    assert_eq!(info.position, 0);
}

#[tokio::test]
async fn test_wait_is_ahead_times_provider_average() {
    let harness = QueueTestHarness::new();
    let mut last = None;
    for customer in ["c1", "c2", "c3", "c4"] {
        last = Some(harness.book("p4", DAY, customer).await);
    }
    let last = last.unwrap();

    let info = harness.service.get_queue_info(last.id).await.unwrap();

    assert_eq!(info.appointments_ahead, 3);
    assert_eq!(info.estimated_wait_time, 3 * 30);
    // Stored estimate and projected estimate are computed differently.
    assert_eq!(last.estimated_wait_time, Some(30));
}

#[tokio::test]
async fn test_in_progress_head_still_counts_as_ahead() {
    let harness = QueueTestHarness::new();
    let a = harness.book("p2", DAY, "c1").await;
    let b = harness.book("p2", DAY, "c2").await;

    harness
        .service
        .set_status(a.id, AppointmentStatus::InProgress)
        .await
        .unwrap();

    let head = harness.service.get_queue_info(a.id).await.unwrap();
    assert_eq!(head.status, QueueStatus::InProgress);
    assert_eq!(head.appointments_ahead, 0);

    let next = harness.service.get_queue_info(b.id).await.unwrap();
    assert_eq!(next.appointments_ahead, 1);
    assert_eq!(next.estimated_wait_time, 20);
    assert_eq!(next.status, QueueStatus::Waiting);
}

#[tokio::test]
async fn test_projection_never_writes() {
    let harness = QueueTestHarness::new();
    harness.book("p1", DAY, "c1").await;
    let b = harness.book("p1", DAY, "c2").await;
    let before = harness.partition("p1", DAY).await;

    for _ in 0..3 {
        harness.service.get_queue_info(b.id).await.unwrap();
    }

    assert_eq!(harness.partition("p1", DAY).await, before);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let harness = QueueTestHarness::new();

    let result = harness.service.get_queue_info(Uuid::new_v4()).await;

    assert_matches!(result, Err(QueueError::NotFound(_)));
}

#[tokio::test]
async fn test_provider_missing_from_catalog_uses_configured_default() {
    // Book against the full catalog, then project with an empty one.
    let store = Arc::new(InMemoryAppointmentStore::new());
    let booking = QueueService::new(
        store.clone(),
        Arc::new(StaticCatalog::seeded()),
        &TestConfig::default().to_app_config(),
    );
    booking.create_appointment(draft("p5", DAY, "c1")).await.unwrap();
    let second = booking
        .create_appointment(draft("p5", DAY, "c2"))
        .await
        .unwrap();

    let config = TestConfig {
        default_average_wait_minutes: 12,
        ..TestConfig::default()
    };
    let empty: Arc<dyn ProviderCatalog> = Arc::new(StaticCatalog::new(Vec::new()));
    let projecting = QueueService::new(store.clone(), empty, &config.to_app_config());

    let info = projecting.get_queue_info(second.id).await.unwrap();

    assert_eq!(info.appointments_ahead, 1);
    assert_eq!(info.estimated_wait_time, 12);
    assert_eq!(
        store
            .load_partition(&PartitionKey::new("p5", DAY))
            .await
            .unwrap()
            .len(),
        2
    );
}
