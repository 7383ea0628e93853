//! Free-text report parser.
//!
//! Messages like "100 monday am" or "tues arvo 92 ty" are scanned once,
//! left to right, filling three independent slots (price, day, day part).
//! Each slot is filled by the first matching token and never overwritten.
//! The returned token counts form a confidence pair the caller can use to
//! reject messages that are mostly unrelated chatter.

use crate::report::{Day, DayPart, PartialReport};

/// A parsed report plus its confidence pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedReport {
    pub report: PartialReport,
    /// Tokens that filled a slot.
    pub used_tokens: usize,
    /// All whitespace-separated tokens in the message.
    pub total_tokens: usize,
}

/// Accepted spellings per day, Sunday first.
const DAY_CANDIDATES: [&[&str]; 7] = [
    &["sun", "sunday"],
    &["mon", "monday"],
    &["tue", "tues", "tuesday"],
    &["wed", "wednesday"],
    &["thu", "thur", "thurs", "thursday"],
    &["fri", "friday"],
    &["sat", "saturday"],
];

/// Accepted spellings per day part, AM first.
const DAY_PART_CANDIDATES: [&[&str]; 2] = [
    &["am", "morn", "morning"],
    &["pm", "arvo", "afternoon"],
];

fn match_token(candidates: &[&[&str]], token: &str) -> Option<usize> {
    candidates
        .iter()
        .position(|spellings| spellings.contains(&token))
}

/// Parse a free-text message into a partial report.
///
/// Empty input yields all fields absent with a 0/0 confidence pair.
pub fn parse_report(text: &str) -> ParsedReport {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let total_tokens = tokens.len();

    let mut report = PartialReport::default();
    let mut used_tokens = 0;

    for token in tokens {
        if report.price.is_none() && token.bytes().all(|b| b.is_ascii_digit()) {
            // Digit runs that overflow u32 are not a price match.
            if let Ok(price) = token.parse::<u32>() {
                report.price = Some(price);
                used_tokens += 1;
            }
        }
        if report.day.is_none() {
            if let Some(day) =
                match_token(&DAY_CANDIDATES, token).and_then(|i| Day::from_index(i as u8))
            {
                report.day = Some(day);
                used_tokens += 1;
            }
        }
        if report.day_part.is_none() {
            if let Some(part) =
                match_token(&DAY_PART_CANDIDATES, token).and_then(|i| DayPart::from_index(i as u8))
            {
                report.day_part = Some(part);
                used_tokens += 1;
            }
        }
    }

    ParsedReport {
        report,
        used_tokens,
        total_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_report() {
        let parsed = parse_report("100 monday am");
        assert_eq!(parsed.report.price, Some(100));
        assert_eq!(parsed.report.day, Some(Day::Monday));
        assert_eq!(parsed.report.day_part, Some(DayPart::Am));
        assert_eq!(parsed.used_tokens, 3);
        assert_eq!(parsed.total_tokens, 3);
    }

    #[test]
    fn empty_input() {
        let parsed = parse_report("");
        assert_eq!(parsed.report, PartialReport::default());
        assert_eq!(parsed.used_tokens, 0);
        assert_eq!(parsed.total_tokens, 0);
    }

    #[test]
    fn price_only() {
        let parsed = parse_report("123");
        assert_eq!(parsed.report.price, Some(123));
        assert_eq!(parsed.report.day, None);
        assert_eq!(parsed.report.day_part, None);
        assert_eq!((parsed.used_tokens, parsed.total_tokens), (1, 1));
    }

    #[test]
    fn first_match_wins_per_slot() {
        let parsed = parse_report("100 200 monday tuesday am pm");
        assert_eq!(parsed.report.price, Some(100));
        assert_eq!(parsed.report.day, Some(Day::Monday));
        assert_eq!(parsed.report.day_part, Some(DayPart::Am));
        assert_eq!(parsed.used_tokens, 3);
        assert_eq!(parsed.total_tokens, 6);
    }

    #[test]
    fn abbreviations_and_case() {
        let parsed = parse_report("Thurs ARVO 88");
        assert_eq!(parsed.report.day, Some(Day::Thursday));
        assert_eq!(parsed.report.day_part, Some(DayPart::Pm));
        assert_eq!(parsed.report.price, Some(88));
    }

    #[test]
    fn sunday_pm_still_parses() {
        // Rejection of Sunday-PM is the decision layer's job.
        let parsed = parse_report("100 sunday pm");
        assert_eq!(parsed.report.day, Some(Day::Sunday));
        assert_eq!(parsed.report.day_part, Some(DayPart::Pm));
        assert_eq!((parsed.used_tokens, parsed.total_tokens), (3, 3));
    }

    #[test]
    fn noise_tokens_do_not_consume() {
        let parsed = parse_report("selling at 105 on wed morning ok");
        assert_eq!(parsed.report.price, Some(105));
        assert_eq!(parsed.report.day, Some(Day::Wednesday));
        assert_eq!(parsed.report.day_part, Some(DayPart::Am));
        assert_eq!(parsed.used_tokens, 3);
        assert_eq!(parsed.total_tokens, 7);
    }

    #[test]
    fn non_numeric_tokens_are_not_prices() {
        let parsed = parse_report("1st 100x x100 100");
        assert_eq!(parsed.report.price, Some(100));
        assert_eq!(parsed.used_tokens, 1);
    }

    #[test]
    fn overflowing_digit_run_is_not_a_price() {
        let parsed = parse_report("99999999999999999999 42");
        assert_eq!(parsed.report.price, Some(42));
        assert_eq!(parsed.used_tokens, 1);
        assert_eq!(parsed.total_tokens, 2);
    }

    #[test]
    fn used_never_exceeds_total() {
        for text in ["", "100", "mon mon mon", "100 mon am pm tue 7"] {
            let parsed = parse_report(text);
            assert!(parsed.used_tokens <= parsed.total_tokens);
        }
    }
}
