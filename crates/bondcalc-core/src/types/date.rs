//! Date type and year fractions.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{BondError, BondResult};

/// Days in the fixed year used to turn day counts into year fractions.
pub const DAYS_PER_YEAR: i64 = 365;

/// A calendar date.
///
/// Newtype wrapper around `chrono::NaiveDate` that parses and prints the
/// `YYYY-MM-DD` form used at every boundary of the engine.
///
/// # Example
///
/// ```rust
/// use bondcalc_core::types::Date;
///
/// let date = Date::parse("2025-01-18").unwrap();
/// assert_eq!(date.add_days(365).to_string(), "2026-01-18");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> BondResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| {
                BondError::invalid_input("date", format!("{year}-{month:02}-{day:02} does not exist"))
            })
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> BondResult<Self> {
        Self::parse_field("date", s)
    }

    /// Parses a `YYYY-MM-DD` string, naming `field` in the error.
    ///
    /// The input must be exactly ten characters: a four-digit year and
    /// two-digit month and day.
    pub fn parse_field(field: &str, s: &str) -> BondResult<Self> {
        let malformed = || BondError::invalid_input(field, format!("cannot parse '{s}' as YYYY-MM-DD"));

        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !well_formed {
            return Err(malformed());
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| malformed())
    }

    /// Returns today's local date.
    ///
    /// Only boundary code calls this; the engine takes dates as arguments.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

}

/// Year fraction from `start` to `end` on a fixed 365-day year.
///
/// Negative when `end` precedes `start`.
#[must_use]
pub fn years_between(start: Date, end: Date) -> f64 {
    start.days_between(&end) as f64 / DAYS_PER_YEAR as f64
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_parse() {
        let date = Date::parse("2024-02-29").unwrap();
        assert_eq!(date, Date::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(date.to_string(), "2024-02-29");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "2025/01/18",
            "18-01-2025",
            "2025-02-30",
            "",
            "tomorrow",
            " 2025-01-18",
            "2025-01-18 ",
            "25-01-18",
            "2025-1-18",
            "+2025-01-18",
        ] {
            let err = Date::parse_field("maturity_date", bad).unwrap_err();
            assert!(err.is_invalid_input(), "{bad} should be rejected");
            assert!(err.to_string().contains("maturity_date"));
        }
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2024, 1, 18).unwrap();
        let d2 = Date::from_ymd(2025, 1, 18).unwrap();
        // 2024 is a leap year
        assert_eq!(d1.days_between(&d2), 366);
        assert_eq!(d2 - d1, 366);
        assert_eq!(d2.days_between(&d1), -366);
    }

    #[test]
    fn test_years_between_uses_365_day_year() {
        let start = Date::from_ymd(2025, 1, 18).unwrap();
        assert_relative_eq!(years_between(start, start + 365), 1.0);
        assert_relative_eq!(years_between(start, start + 73), 0.2);
        assert_relative_eq!(years_between(start + 730, start), -2.0);
    }
}
