//! Month periods and month-range helpers
//!
//! A [`Period`] is a `(month, year)` pair with a zero-based month (January is
//! `0`). Periods order chronologically: by year, then by month.

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of months in a year
pub const MONTHS_PER_YEAR: u32 = 12;

/// A single month of a single year
///
/// Field order matters: the derived ordering compares `year` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = PeriodParseError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        if raw.month >= MONTHS_PER_YEAR {
            return Err(PeriodParseError::InvalidMonth(raw.month));
        }
        Ok(Self {
            year: raw.year,
            month: raw.month,
        })
    }
}

impl Period {
    /// Create a period from a zero-based month and a year
    ///
    /// Months past December carry into later years, so the stored month is
    /// always in `0..=11`.
    ///
    /// ```
    /// use budget_builder::models::Period;
    /// assert_eq!(Period::new(13, 2024), Period::new(1, 2025));
    /// ```
    pub fn new(month: u32, year: i32) -> Self {
        let carry = (month / MONTHS_PER_YEAR) as i32;
        Self {
            year: year.saturating_add(carry),
            month: month % MONTHS_PER_YEAR,
        }
    }

    /// January of `year`
    pub const fn january(year: i32) -> Self {
        Self { year, month: 0 }
    }

    /// December of `year`
    pub const fn december(year: i32) -> Self {
        Self {
            year,
            month: MONTHS_PER_YEAR - 1,
        }
    }

    /// Zero-based month (`0` = January)
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Calendar year
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The following month, rolling December into January of the next year
    pub fn next(&self) -> Self {
        if self.month + 1 == MONTHS_PER_YEAR {
            Self {
                year: self.year.saturating_add(1),
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, rolling January into December of the prior year
    pub fn prev(&self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year.saturating_sub(1),
                month: MONTHS_PER_YEAR - 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Canonical month key, e.g. `"2024-00"` for January 2024
    pub fn key(&self) -> String {
        month_key(self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_month_year(self))
    }
}

/// Parses the human form `YYYY-MM` where `MM` is `01`..`12`
impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Ok(Self {
            year,
            month: month - 1,
        })
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period format: {} (expected YYYY-MM)", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

/// English name of a zero-based month; out-of-range months wrap
pub fn month_name(month: u32) -> &'static str {
    // `month % 12` always fits in a u8 and is a valid chrono month index.
    Month::try_from((month % MONTHS_PER_YEAR) as u8 + 1)
        .map(|m| m.name())
        .unwrap_or("January")
}

/// Human label, e.g. `"January 2024"`
pub fn format_month_year(period: &Period) -> String {
    format!("{} {}", month_name(period.month), period.year)
}

/// Canonical key used to address per-month aggregates: `YYYY-MM` with a
/// zero-based, zero-padded month
pub fn month_key(period: &Period) -> String {
    format!("{}-{:02}", period.year, period.month)
}

/// Chronological comparison of two periods
pub fn compare_month_year(a: &Period, b: &Period) -> Ordering {
    a.cmp(b)
}

/// Every period from `start` to `end` inclusive, in order
///
/// Returns an empty list when `start` is after `end`.
///
/// ```
/// use budget_builder::models::{months_between, Period};
/// let months = months_between(Period::new(11, 2023), Period::new(1, 2024));
/// assert_eq!(months, vec![Period::new(11, 2023), Period::new(0, 2024), Period::new(1, 2024)]);
/// ```
pub fn months_between(start: Period, end: Period) -> Vec<Period> {
    let mut months = Vec::new();
    let mut current = start;

    while current <= end {
        months.push(current);
        let next = current.next();
        if next <= current {
            // year saturated at i32::MAX
            break;
        }
        current = next;
    }

    months
}

/// All twelve months of `years_count` consecutive years from `start_year`,
/// for period pickers
pub fn generate_month_year_options(start_year: i32, years_count: u32) -> Vec<Period> {
    (0..years_count)
        .filter_map(|offset| start_year.checked_add(offset as i32))
        .flat_map(|year| (0..MONTHS_PER_YEAR).map(move |month| Period { year, month }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_month() {
        let period = Period::new(12, 2024);
        assert_eq!(period.month(), 0);
        assert_eq!(period.year(), 2025);

        let period = Period::new(25, 2024);
        assert_eq!(period.month(), 1);
        assert_eq!(period.year(), 2026);
    }

    #[test]
    fn test_navigation() {
        let nov = Period::new(10, 2024);
        assert_eq!(nov.next(), Period::new(11, 2024));
        assert_eq!(Period::new(11, 2024).next(), Period::new(0, 2025));
        assert_eq!(Period::new(0, 2025).prev(), Period::new(11, 2024));
        assert_eq!(nov.prev(), Period::new(9, 2024));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(5), "June");
        assert_eq!(month_name(11), "December");
    }

    #[test]
    fn test_format_month_year() {
        assert_eq!(format_month_year(&Period::new(0, 2024)), "January 2024");
        assert_eq!(format_month_year(&Period::new(6, 2023)), "July 2023");
        assert_eq!(Period::new(6, 2023).to_string(), "July 2023");
    }

    #[test]
    fn test_months_between_same_year() {
        let result = months_between(Period::new(0, 2024), Period::new(2, 2024));
        assert_eq!(
            result,
            vec![
                Period::new(0, 2024),
                Period::new(1, 2024),
                Period::new(2, 2024)
            ]
        );
    }

    #[test]
    fn test_months_between_year_transition() {
        let result = months_between(Period::new(11, 2023), Period::new(1, 2024));
        assert_eq!(
            result,
            vec![
                Period::new(11, 2023),
                Period::new(0, 2024),
                Period::new(1, 2024)
            ]
        );
    }

    #[test]
    fn test_months_between_single_and_inverted() {
        let june = Period::new(5, 2024);
        assert_eq!(months_between(june, june), vec![june]);
        assert!(months_between(Period::new(6, 2024), june).is_empty());
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key(&Period::new(0, 2024)), "2024-00");
        assert_eq!(Period::new(9, 2024).key(), "2024-09");
    }

    #[test]
    fn test_compare_month_year() {
        let a = Period::new(11, 2023);
        let b = Period::new(0, 2024);
        assert_eq!(compare_month_year(&a, &b), Ordering::Less);
        assert_eq!(compare_month_year(&b, &a), Ordering::Greater);

        let c = Period::new(5, 2024);
        let d = Period::new(8, 2024);
        assert_eq!(compare_month_year(&c, &d), Ordering::Less);
        assert_eq!(compare_month_year(&c, &c), Ordering::Equal);
    }

    #[test]
    fn test_generate_options() {
        let options = generate_month_year_options(2024, 2);
        assert_eq!(options.len(), 24);
        assert_eq!(options[0], Period::new(0, 2024));
        assert_eq!(options[23], Period::new(11, 2025));
    }

    #[test]
    fn test_parse() {
        assert_eq!("2024-01".parse::<Period>().unwrap(), Period::new(0, 2024));
        assert_eq!("2023-12".parse::<Period>().unwrap(), Period::new(11, 2023));
        assert_eq!(
            "2024-13".parse::<Period>(),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(matches!(
            "January".parse::<Period>(),
            Err(PeriodParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let period = Period::new(3, 2024);
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);

        let bad = serde_json::from_str::<Period>(r#"{"month":12,"year":2024}"#);
        assert!(bad.is_err());
    }
}
