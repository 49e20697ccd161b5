use chrono::{Duration, NaiveDate};
use rand::Rng;
use uuid::Uuid;

use crate::models::TimeSlot;

pub const SLOT_DAYS: i64 = 7;
pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 17;
pub const SLOT_MINUTES: u32 = 30;
pub const SLOT_AVAILABILITY: f64 = 0.7;

/// Generates candidate booking windows. Pure data: nothing here is stored or
/// checked against existing appointments.
pub struct TimeSlotService;

impl TimeSlotService {
    pub fn new() -> Self {
        Self
    }

    pub fn available_slots(&self, provider_id: &str, from: NaiveDate) -> Vec<TimeSlot> {
        self.slots_with_rng(provider_id, from, &mut rand::thread_rng())
    }

    pub fn slots_with_rng<R: Rng + ?Sized>(
        &self,
        provider_id: &str,
        from: NaiveDate,
        rng: &mut R,
    ) -> Vec<TimeSlot> {
        let mut slots = Vec::new();

        for offset in 0..SLOT_DAYS {
            let date = (from + Duration::days(offset)).format("%Y-%m-%d").to_string();

            for hour in OPENING_HOUR..CLOSING_HOUR {
                for minute in (0..60).step_by(SLOT_MINUTES as usize) {
                    let start = hour * 60 + minute;
                    let end = start + SLOT_MINUTES;

                    slots.push(TimeSlot {
                        id: Uuid::new_v4(),
                        provider_id: provider_id.to_string(),
                        date: date.clone(),
                        start_time: clock(start),
                        end_time: clock(end),
                        is_available: rng.gen_bool(SLOT_AVAILABILITY),
                    });
                }
            }
        }

        slots
    }
}

impl Default for TimeSlotService {
    fn default() -> Self {
        Self::new()
    }
}

fn clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
