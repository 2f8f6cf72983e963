//! Calendar period (month + year) used by summaries and list filters.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned for out-of-range period components.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// Month outside 1-12.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}

/// A calendar month within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Month number (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Period {
    /// Creates a period, validating the month range.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` if `month` is not in 1-12.
    pub const fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if month == 0 || month > 12 {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self { month, year })
    }

    /// Returns the current calendar month in UTC.
    #[must_use]
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }

    /// Returns the period one month earlier.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// Returns the last `n` periods ending at `self`, oldest first.
    #[must_use]
    pub fn last_n(self, n: usize) -> Vec<Self> {
        let mut periods = Vec::with_capacity(n);
        let mut current = self;
        for _ in 0..n {
            periods.push(current);
            current = current.previous();
        }
        periods.reverse();
        periods
    }

    /// Full English month name, e.g. "August".
    #[must_use]
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1).min(11)]
    }

    /// Three-letter month abbreviation, e.g. "Aug".
    #[must_use]
    pub fn short_month_name(self) -> &'static str {
        &self.month_name()[..3]
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_month_rejected(#[case] month: u32) {
        assert_eq!(
            Period::new(month, 2026),
            Err(PeriodError::InvalidMonth(month))
        );
    }

    #[rstest]
    #[case(1)]
    #[case(6)]
    #[case(12)]
    fn test_valid_month_accepted(#[case] month: u32) {
        assert!(Period::new(month, 2026).is_ok());
    }

    #[test]
    fn test_previous_wraps_year() {
        let jan = Period::new(1, 2026).unwrap();
        assert_eq!(jan.previous(), Period::new(12, 2025).unwrap());
    }

    #[test]
    fn test_previous_same_year() {
        let aug = Period::new(8, 2026).unwrap();
        assert_eq!(aug.previous(), Period::new(7, 2026).unwrap());
    }

    #[test]
    fn test_last_n_oldest_first() {
        let feb = Period::new(2, 2026).unwrap();
        let periods = feb.last_n(3);
        assert_eq!(
            periods,
            vec![
                Period::new(12, 2025).unwrap(),
                Period::new(1, 2026).unwrap(),
                feb
            ]
        );
    }

    #[test]
    fn test_month_names() {
        let aug = Period::new(8, 2026).unwrap();
        assert_eq!(aug.month_name(), "August");
        assert_eq!(aug.short_month_name(), "Aug");
    }

    #[test]
    fn test_display() {
        let p = Period::new(3, 2026).unwrap();
        assert_eq!(p.to_string(), "2026-03");
    }
}
