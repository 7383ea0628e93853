//! The 13-slot weekly price series and its wire encoding.
//!
//! The prediction site takes the whole week as a dot-joined string of 13
//! integers: Sunday, then Monday-AM through Saturday-PM. Unset slots are
//! encoded as a literal `0`.

use crate::report::Report;

/// Number of price slots in a week: 1 Sunday slot + 6 days x 2 parts.
pub const SLOT_COUNT: usize = 13;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("expected {SLOT_COUNT} slots, got {0}")]
    WrongSlotCount(usize),
    #[error("invalid price at slot {0}: {1:?}")]
    InvalidPrice(usize, String),
}

/// A full week of prices, 0 meaning unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceSeries([u32; SLOT_COUNT]);

impl PriceSeries {
    /// Place each report's price at its slot index; untouched slots stay 0.
    pub fn from_reports(reports: &[Report]) -> PriceSeries {
        let mut prices = [0u32; SLOT_COUNT];
        for report in reports {
            prices[report.slot().index()] = report.price;
        }
        PriceSeries(prices)
    }

    /// Dot-joined wire form, e.g. `90.0.0.105.0.0.0.0.0.0.0.0.0`.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Inverse of [`PriceSeries::encode`].
    pub fn parse(text: &str) -> Result<PriceSeries, SeriesError> {
        let mut prices = [0u32; SLOT_COUNT];
        let mut count = 0;
        for (index, field) in text.split('.').enumerate() {
            if index >= SLOT_COUNT {
                return Err(SeriesError::WrongSlotCount(index + 1));
            }
            prices[index] = field
                .parse()
                .map_err(|_| SeriesError::InvalidPrice(index, field.to_string()))?;
            count = index + 1;
        }
        if count != SLOT_COUNT {
            return Err(SeriesError::WrongSlotCount(count));
        }
        Ok(PriceSeries(prices))
    }

    pub fn slots(&self) -> &[u32; SLOT_COUNT] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Day, DayPart, Report};

    #[test]
    fn empty_series_encodes_all_zeroes() {
        assert_eq!(
            PriceSeries::from_reports(&[]).encode(),
            "0.0.0.0.0.0.0.0.0.0.0.0.0"
        );
    }

    #[test]
    fn reports_land_in_their_slots() {
        let reports = [
            Report::new(Day::Sunday, DayPart::Am, 90),
            Report::new(Day::Monday, DayPart::Pm, 105),
            Report::new(Day::Saturday, DayPart::Pm, 55),
        ];
        let series = PriceSeries::from_reports(&reports);
        assert_eq!(series.slots()[0], 90);
        assert_eq!(series.slots()[2], 105);
        assert_eq!(series.slots()[12], 55);
        assert_eq!(series.encode(), "90.0.105.0.0.0.0.0.0.0.0.0.55");
    }

    #[test]
    fn encode_parse_round_trip() {
        let reports = [
            Report::new(Day::Sunday, DayPart::Am, 110),
            Report::new(Day::Wednesday, DayPart::Am, 48),
            Report::new(Day::Friday, DayPart::Pm, 600),
        ];
        let series = PriceSeries::from_reports(&reports);
        assert_eq!(PriceSeries::parse(&series.encode()), Ok(series));
    }

    #[test]
    fn parse_rejects_wrong_slot_count() {
        assert_eq!(
            PriceSeries::parse("1.2.3"),
            Err(SeriesError::WrongSlotCount(3))
        );
        let fourteen = ["0"; 14].join(".");
        assert_eq!(
            PriceSeries::parse(&fourteen),
            Err(SeriesError::WrongSlotCount(14))
        );
    }

    #[test]
    fn parse_rejects_junk() {
        assert_eq!(
            PriceSeries::parse("0.0.x.0.0.0.0.0.0.0.0.0.0"),
            Err(SeriesError::InvalidPrice(2, "x".to_string()))
        );
    }
}
