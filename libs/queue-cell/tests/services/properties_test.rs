use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use queue_cell::*;
use shared_models::appointment::AppointmentStatus;

use super::{assert_contiguous, QueueTestHarness, DAY};

const PROVIDERS: [&str; 3] = ["p1", "p3", "p6"];

/// Drives random bookings and status changes and checks the queue shape
/// after every step.
async fn run_random_walk(seed: u64, steps: usize) {
    let harness = QueueTestHarness::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut booked: Vec<Uuid> = Vec::new();

    for step in 0..steps {
        let provider = PROVIDERS[rng.gen_range(0..PROVIDERS.len())];

        if booked.is_empty() || rng.gen_bool(0.4) {
            let active_before = harness.active_positions(provider, DAY).await.len() as u32;
            let customer = format!("c{}", step);
            let created = harness.book(provider, DAY, &customer).await;

            assert_eq!(created.queue_position, Some(active_before + 1));
            booked.push(created.id);
        } else {
            let id = booked[rng.gen_range(0..booked.len())];
            let current = harness.service.get_appointment(id).await.unwrap();
            let next = match rng.gen_range(0..4) {
                0 => AppointmentStatus::InProgress,
                1 => AppointmentStatus::Completed,
                2 => AppointmentStatus::Cancelled,
                _ => AppointmentStatus::NoShow,
            };

            let before: HashMap<Uuid, Option<u32>> = harness
                .partition(&current.provider_id, DAY)
                .await
                .into_iter()
                .map(|a| (a.id, a.queue_position))
                .collect();

            let result = harness.service.set_status(id, next).await;
            let allowed = StatusTransitionValidator::valid_transitions(current.status).contains(&next);
            let after = harness.partition(&current.provider_id, DAY).await;

            if !allowed {
                assert!(matches!(result, Err(QueueError::InvalidTransition { .. })));
                for a in &after {
                    assert_eq!(before[&a.id], a.queue_position);
                }
                continue;
            }
            assert!(result.is_ok());

            let former = current.queue_position.unwrap();
            for a in after.iter().filter(|a| a.id != id) {
                let expected = match before[&a.id] {
                    Some(p) if next.is_terminal() && a.is_active() && p > former => Some(p - 1),
                    other => other,
                };
                assert_eq!(a.queue_position, expected, "step {} moved {}", step, a.id);
            }
        }

        for provider in PROVIDERS {
            assert_contiguous(harness.active_positions(provider, DAY).await);
        }
    }
}

#[tokio::test]
async fn test_random_walk_keeps_queues_contiguous() {
    for seed in [7, 42, 1234] {
        run_random_walk(seed, 120).await;
    }
}

#[tokio::test]
async fn test_every_terminal_status_closes_the_gap() {
    for terminal in [
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
        AppointmentStatus::Completed,
    ] {
        let harness = QueueTestHarness::new();
        let booked = [
            harness.book("p2", DAY, "c1").await,
            harness.book("p2", DAY, "c2").await,
            harness.book("p2", DAY, "c3").await,
        ];
        let middle = booked[1].id;

        if terminal == AppointmentStatus::Completed {
            harness
                .service
                .set_status(middle, AppointmentStatus::InProgress)
                .await
                .unwrap();
        }
        harness.service.set_status(middle, terminal).await.unwrap();

        assert_eq!(harness.position_of(&booked[0]).await, Some(1));
        assert_eq!(harness.position_of(&booked[2]).await, Some(2));
        assert_contiguous(harness.active_positions("p2", DAY).await);
    }
}
