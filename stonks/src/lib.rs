pub mod clock;
pub mod decision;
pub mod parser;
pub mod report;
pub mod rollover;
pub mod series;

pub use clock::{day_of_timestamp, Clock, LocalClock};
pub use decision::{evaluate, resolve_submission, Decision, Submission};
pub use parser::{parse_report, ParsedReport};
pub use report::{Day, DayPart, PartialReport, Report, Slot};
pub use rollover::{check_maintenance, rollover_due, MaintenanceOutcome, NEVER};
pub use series::{PriceSeries, SeriesError, SLOT_COUNT};
