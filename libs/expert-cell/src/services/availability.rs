use chrono::{Datelike, NaiveDate};
use rand::Rng;

use shared_utils::seed::{compose_key, derive_rng};

use crate::models::TimeSlot;

pub const FIRST_SLOT_HOUR: u32 = 9;
pub const LAST_SLOT_HOUR: u32 = 17;
const AVAILABILITY_RATE: f64 = 0.7;

/// Hourly slots from 09:00 to 17:00. Availability is mock data drawn from a
/// generator keyed by expert and date, so a given seed always answers the
/// same way for the same day.
pub fn time_slots_for(seed: u64, expert_id: u64, date: NaiveDate) -> Vec<TimeSlot> {
    let key = compose_key(&[expert_id, date.num_days_from_ce() as u64]);
    let mut rng = derive_rng(seed, key);

    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| TimeSlot {
            time: format!("{:02}:00", hour),
            available: rng.gen_bool(AVAILABILITY_RATE),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn nine_hourly_slots() {
        let slots = time_slots_for(1, 3, date("2026-11-02"));
        let times: Vec<&str> = slots.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(
            times,
            vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
        );
    }

    #[test]
    fn availability_is_reproducible() {
        let d = date("2026-11-02");
        assert_eq!(time_slots_for(5, 2, d), time_slots_for(5, 2, d));
    }
}
