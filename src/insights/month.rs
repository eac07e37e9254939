//! Calendar-month bucketing. All arithmetic is pure year/month math in UTC;
//! day-of-month is normalized to 1 so buckets never drift with month length.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::InsightError;

/// A single calendar month, formatted as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month; the canonical bucket boundary.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month key holds a valid year/month pair")
    }

    /// Shifts by `months`, crossing year boundaries as needed.
    pub fn add(self, months: i32) -> Self {
        let index = self.index() + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }

    /// Signed month distance from `self` to `other`.
    pub fn diff(self, other: MonthKey) -> i64 {
        other.index() - self.index()
    }

    /// Count of calendar months touched by the inclusive interval
    /// `[start, end]`; 1 when both fall in the same month.
    pub fn span_inclusive(start: MonthKey, end: MonthKey) -> i64 {
        start.diff(end) + 1
    }

    /// `count` contiguous months ending at `last`, oldest first.
    pub fn window_ending(last: MonthKey, count: u32) -> Vec<MonthKey> {
        let count = count.max(1);
        (0..count)
            .rev()
            .map(|back| last.add(-(back as i32)))
            .collect()
    }

    fn index(self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = InsightError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InsightError::InvalidInput(format!("malformed month key `{}`", value));
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
