//! Report model: days, day parts, and the 13 weekly price slots.

use std::fmt;

/// Day of the week. The price week starts on Sunday, so `Sunday` is index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Day> {
        Day::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// Half of a trading day. Sunday only has a morning slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayPart {
    Am,
    Pm,
}

impl DayPart {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<DayPart> {
        match index {
            0 => Some(DayPart::Am),
            1 => Some(DayPart::Pm),
            _ => None,
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayPart::Am => "AM",
            DayPart::Pm => "PM",
        })
    }
}

/// A fully resolved price report. The only form that may be persisted.
///
/// Invariant: `day == Sunday` implies `day_part == Am`. The acceptance
/// gates in [`crate::decision`] enforce this before a `Report` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub day: Day,
    pub day_part: DayPart,
    pub price: u32,
}

impl Report {
    pub fn new(day: Day, day_part: DayPart, price: u32) -> Report {
        Report {
            day,
            day_part,
            price,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot {
            day: self.day,
            day_part: self.day_part,
        }
    }
}

/// Parser output: any field may still be missing.
///
/// A partial report is never persisted; absence is `None`, never a
/// sentinel value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialReport {
    pub day: Option<Day>,
    pub day_part: Option<DayPart>,
    pub price: Option<u32>,
}

/// One of the 13 weekly reporting buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub day: Day,
    pub day_part: DayPart,
}

impl Slot {
    pub const COUNT: usize = 13;

    /// Position in the week-long series: Sunday is slot 0, then
    /// Monday-AM = 1, Monday-PM = 2, ... Saturday-PM = 12.
    pub fn index(self) -> usize {
        match self.day {
            Day::Sunday => 0,
            day => day.index() as usize * 2 + self.day_part.index() as usize - 1,
        }
    }
}
