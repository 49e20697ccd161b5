use futures::future::join_all;

use shared_models::appointment::AppointmentStatus;

use super::{assert_contiguous, draft, QueueTestHarness, DAY};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_get_distinct_positions() {
    let harness = QueueTestHarness::new();

    let tasks = (0..25).map(|i| {
        let service = harness.service.clone();
        tokio::spawn(async move {
            service
                .create_appointment(draft("p1", DAY, &format!("c{}", i)))
                .await
        })
    });
    let results = join_all(tasks).await;

    let mut positions: Vec<u32> = results
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().queue_position.unwrap())
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, (1..=25).collect::<Vec<u32>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cancels_and_bookings_stay_contiguous() {
    let harness = QueueTestHarness::new();
    let mut booked = Vec::new();
    for i in 0..20 {
        booked.push(harness.book("p3", DAY, &format!("c{}", i)).await);
    }

    let cancels = booked.iter().step_by(2).map(|appointment| {
        let service = harness.service.clone();
        let id = appointment.id;
        tokio::spawn(async move {
            service
                .set_status(id, AppointmentStatus::Cancelled)
                .await
                .map(|_| ())
        })
    });
    let bookings = (20..30).map(|i| {
        let service = harness.service.clone();
        tokio::spawn(async move {
            service
                .create_appointment(draft("p3", DAY, &format!("c{}", i)))
                .await
                .map(|_| ())
        })
    });
    let results = join_all(cancels.chain(bookings)).await;

    for joined in results {
        joined.unwrap().unwrap();
    }

    let positions = harness.active_positions("p3", DAY).await;
    assert_eq!(positions.len(), 20);
    assert_contiguous(positions);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_other_partitions_are_not_blocked() {
    let harness = QueueTestHarness::new();

    let tasks = ["p1", "p2", "p4", "p6"].into_iter().flat_map(|provider| {
        let harness_service = harness.service.clone();
        (0..5).map(move |i| {
            let service = harness_service.clone();
            tokio::spawn(async move {
                service
                    .create_appointment(draft(provider, DAY, &format!("c{}", i)))
                    .await
            })
        })
    });
    for joined in join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    for provider in ["p1", "p2", "p4", "p6"] {
        let positions = harness.active_positions(provider, DAY).await;
        assert_eq!(positions.len(), 5);
        assert_contiguous(positions);
    }
}
