//! Wall-clock collaborator.
//!
//! All day math is in local time with the week normalized to Sunday = 0.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use crate::report::{Day, DayPart};

/// Local-time weekday of a unix timestamp, Sunday = 0.
pub fn day_of_timestamp(ts: i64) -> Day {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => day_of_datetime(&dt),
        // Unrepresentable timestamps cannot come from a real clock.
        None => Day::Sunday,
    }
}

fn day_of_datetime(dt: &DateTime<Local>) -> Day {
    Day::from_index(dt.weekday().num_days_from_sunday() as u8).unwrap_or(Day::Sunday)
}

fn day_part_of_hour(hour: u32) -> DayPart {
    if hour >= 12 {
        DayPart::Pm
    } else {
        DayPart::Am
    }
}

/// Source of "now" for the acceptance gates and the rollover check.
pub trait Clock: Send + Sync {
    fn now_ts(&self) -> i64;
    fn current_day(&self) -> Day;
    fn current_day_part(&self) -> DayPart;
}

/// The real local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now_ts(&self) -> i64 {
        Local::now().timestamp()
    }

    fn current_day(&self) -> Day {
        day_of_datetime(&Local::now())
    }

    fn current_day_part(&self) -> DayPart {
        day_part_of_hour(Local::now().hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noon_splits_the_day() {
        assert_eq!(day_part_of_hour(0), DayPart::Am);
        assert_eq!(day_part_of_hour(11), DayPart::Am);
        assert_eq!(day_part_of_hour(12), DayPart::Pm);
        assert_eq!(day_part_of_hour(23), DayPart::Pm);
    }

    #[test]
    fn consecutive_days_advance_the_weekday() {
        let ts = 1_586_001_600; // 2020-04-04 12:00 UTC, a Saturday
        let first = day_of_timestamp(ts);
        let second = day_of_timestamp(ts + 86_400);
        assert_eq!(
            (second.index() + 7 - first.index()) % 7,
            1,
            "one day apart means one weekday apart"
        );
    }

    #[test]
    fn local_clock_is_internally_consistent() {
        let clock = LocalClock;
        assert_eq!(day_of_timestamp(clock.now_ts()), clock.current_day());
    }
}
