//! Money type and numeric helpers
//!
//! Every stored amount is a [`Money`]: signed integer cents. Converting a raw
//! `f64` into `Money` is where two-decimal rounding happens, so cell values,
//! totals and balances can never carry more than two decimals. Sums and
//! differences of `Money` are exact, which makes "round after every
//! accumulation step" hold by construction.
//!
//! The free functions at the bottom of this module are the `f64` flavoured
//! helpers a UI layer calls directly: rounding, rounded summation, lenient
//! parsing of typed text and grouped formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use tracing::warn;

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount
    pub const MIN: Money = Money(i64::MIN);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budget_builder::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.as_f64(), 10.5);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a raw number, rounding to two decimals
    ///
    /// Halves round towards positive infinity (`10.125` becomes `10.13`,
    /// `-10.125` becomes `-10.12`). Non-finite input becomes zero. Amounts
    /// beyond the `i64` cents range clamp to [`Money::MAX`] or [`Money::MIN`]
    /// and log a warning.
    ///
    /// # Examples
    /// ```
    /// use budget_builder::models::Money;
    /// assert_eq!(Money::from_f64(10.126).cents(), 1013);
    /// assert_eq!(Money::from_f64(f64::NAN), Money::zero());
    /// ```
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        let scaled = (value * 100.0 + 0.5).floor();
        if scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
            warn!(value, "amount out of range, clamped");
        }
        // `as` saturates at the i64 bounds.
        Self(scaled as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a two-decimal float
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse free-form text leniently (see [`parse_numeric_value`])
    pub fn parse_lenient(text: &str) -> Self {
        Self::from_f64(parse_numeric_value(text))
    }

    /// Format with two decimals and comma thousands separators, no symbol
    pub fn format_grouped(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let units = self.0.unsigned_abs() / 100;
        format!(
            "{}{}.{:02}",
            sign,
            group_thousands(units),
            self.cents_part()
        )
    }
}

fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_grouped())
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Round a number to two decimal places
///
/// ```
/// use budget_builder::models::money::round_to_two_decimals;
/// assert_eq!(round_to_two_decimals(10.125), 10.13);
/// assert_eq!(round_to_two_decimals(-10.456), -10.46);
/// ```
pub fn round_to_two_decimals(value: f64) -> f64 {
    Money::from_f64(value).as_f64()
}

/// Sum a slice of numbers and round the result to two decimals
pub fn sum_rounded(values: &[f64]) -> f64 {
    round_to_two_decimals(values.iter().fold(0.0, |acc, v| acc + v))
}

/// Parse typed text into a number, never failing
///
/// Every character outside `[0-9.-]` is stripped first, so currency symbols
/// and thousands separators disappear. The longest leading numeric prefix of
/// what remains is parsed and rounded to two decimals. Text with no numeric
/// prefix yields `0.0`.
///
/// ```
/// use budget_builder::models::money::parse_numeric_value;
/// assert_eq!(parse_numeric_value("$1,234.56"), 1234.56);
/// assert_eq!(parse_numeric_value("abc"), 0.0);
/// ```
pub fn parse_numeric_value(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    leading_number(&cleaned)
        .map(round_to_two_decimals)
        .unwrap_or(0.0)
}

/// Parse the longest `-?digits(.digits)?` prefix, like a float parser that
/// stops at the first character it cannot use
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digit_count += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digit_count == 0 {
        return None;
    }

    s[..end].parse().ok()
}

/// Format a number with two decimals and thousands grouping, no symbol
///
/// Halves round away from zero here, so `-10.125` formats as `-10.13`.
///
/// ```
/// use budget_builder::models::money::format_currency;
/// assert_eq!(format_currency(-1234.56), "-1,234.56");
/// assert_eq!(format_currency(-10.125), "-10.13");
/// ```
pub fn format_currency(value: f64) -> String {
    let magnitude = Money::from_f64(value.abs());
    if value.is_sign_negative() {
        (-magnitude).format_grouped()
    } else {
        magnitude.format_grouped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_f64_rounding() {
        assert_eq!(Money::from_f64(10.123).cents(), 1012);
        assert_eq!(Money::from_f64(10.126).cents(), 1013);
        assert_eq!(Money::from_f64(10.125).cents(), 1013);
        assert_eq!(Money::from_f64(-10.456).cents(), -1046);
        assert_eq!(Money::from_f64(10.0).cents(), 1000);
    }

    #[test]
    fn test_from_f64_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_zero());
        assert!(Money::from_f64(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_from_f64_clamps_out_of_range() {
        assert_eq!(Money::from_f64(1e18), Money::MAX);
        assert_eq!(Money::from_f64(-1e18), Money::MIN);
        assert_eq!(Money::from_f64(1e15).cents(), 100_000_000_000_000_000);
    }

    #[test]
    fn test_format_currency_rounds_halves_away_from_zero() {
        assert_eq!(format_currency(10.125), "10.13");
        assert_eq!(format_currency(-10.125), "-10.13");
        assert_eq!(format_currency(-0.001), "0.00");
        assert_eq!(format_currency(-1234567.891), "-1,234,567.89");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "1,234,567.89");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((Money::from_cents(i64::MAX) + a).cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_round_to_two_decimals() {
        assert_eq!(round_to_two_decimals(10.123), 10.12);
        assert_eq!(round_to_two_decimals(10.126), 10.13);
        assert_eq!(round_to_two_decimals(10.0), 10.0);
        assert_eq!(round_to_two_decimals(-10.456), -10.46);
    }

    #[test]
    fn test_sum_rounded() {
        assert_eq!(sum_rounded(&[1.0, 2.0, 3.0, 4.0, 5.0]), 15.0);
        assert_eq!(sum_rounded(&[]), 0.0);
        assert_eq!(sum_rounded(&[0.1, 0.2, 0.3]), 0.6);
        assert_eq!(sum_rounded(&[10.0, -5.0, 3.0]), 8.0);
    }

    #[test]
    fn test_parse_numeric_value() {
        assert_eq!(parse_numeric_value("123.45"), 123.45);
        assert_eq!(parse_numeric_value("100"), 100.0);
        assert_eq!(parse_numeric_value("$123.45"), 123.45);
        assert_eq!(parse_numeric_value("€100.00"), 100.0);
        assert_eq!(parse_numeric_value("1,234.56"), 1234.56);
        assert_eq!(parse_numeric_value("$1,234.56"), 1234.56);
        assert_eq!(parse_numeric_value("-123.45"), -123.45);
    }

    #[test]
    fn test_parse_numeric_value_invalid() {
        assert_eq!(parse_numeric_value("abc"), 0.0);
        assert_eq!(parse_numeric_value(""), 0.0);
        assert_eq!(parse_numeric_value("-"), 0.0);
        assert_eq!(parse_numeric_value("."), 0.0);
    }

    #[test]
    fn test_parse_numeric_value_stops_at_first_unusable_char() {
        assert_eq!(parse_numeric_value("1.2.3"), 1.2);
        assert_eq!(parse_numeric_value("12-4"), 12.0);
        assert_eq!(parse_numeric_value(".5"), 0.5);
        assert_eq!(parse_numeric_value("7."), 7.0);
        assert_eq!(parse_numeric_value("3.14159"), 3.14);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "1,234.56");
        assert_eq!(format_currency(100.0), "100.00");
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(-1234.56), "-1,234.56");
        assert_eq!(format_currency(999.999), "1,000.00");
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Money::parse_lenient("$2,500").cents(), 250_000);
        assert!(Money::parse_lenient("n/a").is_zero());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
