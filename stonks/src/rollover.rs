//! Weekly rollover edge detection.
//!
//! The maintenance tick fires far more often than once a week; rollover
//! must trigger exactly once per week boundary. Requiring a transition
//! from "last seen day was not Sunday" to "today is Sunday" makes the
//! detector level-triggered and idempotent within a week.

use crate::clock::day_of_timestamp;
use crate::report::Day;

/// Sentinel for "maintenance has never run".
pub const NEVER: i64 = 0;

/// What a maintenance tick should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceOutcome {
    /// First ever tick: record the timestamp, never roll over.
    Bootstrapped,
    /// The week boundary was crossed since the last tick.
    Rollover,
    Noop,
}

/// True iff the week boundary was crossed between the two observations.
pub fn rollover_due(last_day: Day, now_day: Day) -> bool {
    now_day == Day::Sunday && last_day != Day::Sunday
}

pub fn check_maintenance(last_ts: i64, now_ts: i64) -> MaintenanceOutcome {
    if last_ts == NEVER {
        return MaintenanceOutcome::Bootstrapped;
    }
    if rollover_due(day_of_timestamp(last_ts), day_of_timestamp(now_ts)) {
        MaintenanceOutcome::Rollover
    } else {
        MaintenanceOutcome::Noop
    }
}
