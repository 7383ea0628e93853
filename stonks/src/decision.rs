//! Acceptance gates for parsed reports.
//!
//! Every gate failure is a silent rejection: no store mutation, no reply.
//! The gates run in a fixed order; see [`evaluate`].

use crate::parser::ParsedReport;
use crate::report::{Day, DayPart, Report};

/// Unmatched-token count at which a message stops looking like a report.
const NOISE_THRESHOLD: usize = 3;

/// Outcome of running a parsed report through the acceptance gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept {
        report: Report,
        /// True when the user named the day/part explicitly, which
        /// authorizes overwriting an existing price for that slot.
        replace: bool,
    },
    Reject,
}

/// Outcome of applying an accepted report against the stored slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Recorded { price: u32 },
    Updated { old_price: u32, new_price: u32 },
    Rejected,
}

/// Run the acceptance gates, in order:
///
/// 1. noise gate (too many unmatched tokens),
/// 2. price gate (no price, no deal),
/// 3. Sunday normalization (Sunday has a single AM slot),
/// 4. specificity gate (day and part must both be given or both omitted),
/// 5. default fill from the current day/part,
/// 6. Sunday normalization again on the defaulted day.
pub fn evaluate(parsed: &ParsedReport, now_day: Day, now_part: DayPart) -> Decision {
    if parsed.total_tokens - parsed.used_tokens >= NOISE_THRESHOLD {
        return Decision::Reject;
    }

    let Some(price) = parsed.report.price else {
        return Decision::Reject;
    };

    let day = parsed.report.day;
    let mut day_part = parsed.report.day_part;

    if day == Some(Day::Sunday) {
        if day_part == Some(DayPart::Pm) {
            return Decision::Reject;
        }
        day_part = Some(DayPart::Am);
    }

    // An explicit day without a part (or vice versa) is ambiguous.
    let day_specified = day.is_some();
    if day_specified != day_part.is_some() {
        return Decision::Reject;
    }
    let replace = day_specified;

    let day = day.unwrap_or(now_day);
    let mut day_part = day_part.unwrap_or(now_part);

    // The defaulted day may itself be Sunday afternoon.
    if day == Day::Sunday {
        if day_part == DayPart::Pm {
            return Decision::Reject;
        }
        day_part = DayPart::Am;
    }

    Decision::Accept {
        report: Report::new(day, day_part, price),
        replace,
    }
}

/// Decide what a submission against `existing` means.
///
/// An implicit report (replace = false) never overwrites an existing
/// price; it is rejected without notification.
pub fn resolve_submission(existing: Option<u32>, price: u32, replace: bool) -> Submission {
    match existing {
        None => Submission::Recorded { price },
        Some(old_price) if replace => Submission::Updated {
            old_price,
            new_price: price,
        },
        Some(_) => Submission::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_report;

    const NOW_DAY: Day = Day::Tuesday;
    const NOW_PART: DayPart = DayPart::Pm;

    fn eval(text: &str) -> Decision {
        evaluate(&parse_report(text), NOW_DAY, NOW_PART)
    }

    #[test]
    fn explicit_report_accepted_with_replace() {
        assert_eq!(
            eval("100 monday am"),
            Decision::Accept {
                report: Report::new(Day::Monday, DayPart::Am, 100),
                replace: true,
            }
        );
    }

    #[test]
    fn implicit_report_defaults_to_now() {
        assert_eq!(
            eval("100"),
            Decision::Accept {
                report: Report::new(NOW_DAY, NOW_PART, 100),
                replace: false,
            }
        );
    }

    #[test]
    fn noise_gate_rejects() {
        assert_eq!(eval("hey guys selling for 100 come on over"), Decision::Reject);
    }

    #[test]
    fn up_to_two_stray_tokens_pass() {
        assert_eq!(
            eval("100 monday am lol ok"),
            Decision::Accept {
                report: Report::new(Day::Monday, DayPart::Am, 100),
                replace: true,
            }
        );
    }

    #[test]
    fn missing_price_rejects() {
        assert_eq!(eval("monday am"), Decision::Reject);
    }

    #[test]
    fn sunday_pm_rejects() {
        assert_eq!(eval("100 sunday pm"), Decision::Reject);
    }

    #[test]
    fn sunday_without_part_forces_am() {
        // The forced AM also satisfies the specificity gate.
        assert_eq!(
            eval("100 sunday"),
            Decision::Accept {
                report: Report::new(Day::Sunday, DayPart::Am, 100),
                replace: true,
            }
        );
    }

    #[test]
    fn specificity_mismatch_rejects() {
        assert_eq!(eval("100 monday"), Decision::Reject);
        assert_eq!(eval("100 am"), Decision::Reject);
    }

    #[test]
    fn implicit_sunday_afternoon_rejects() {
        // Current time is Sunday PM; the defaulted slot does not exist.
        let parsed = parse_report("100");
        assert_eq!(
            evaluate(&parsed, Day::Sunday, DayPart::Pm),
            Decision::Reject
        );
    }

    #[test]
    fn implicit_sunday_morning_accepts() {
        let parsed = parse_report("100");
        assert_eq!(
            evaluate(&parsed, Day::Sunday, DayPart::Am),
            Decision::Accept {
                report: Report::new(Day::Sunday, DayPart::Am, 100),
                replace: false,
            }
        );
    }

    #[test]
    fn submission_outcomes() {
        assert_eq!(
            resolve_submission(None, 100, false),
            Submission::Recorded { price: 100 }
        );
        assert_eq!(
            resolve_submission(Some(90), 100, true),
            Submission::Updated {
                old_price: 90,
                new_price: 100,
            }
        );
        assert_eq!(resolve_submission(Some(90), 100, false), Submission::Rejected);
    }
}
