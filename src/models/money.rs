//! Money type for representing currency amounts
//!
//! Amounts are exact decimals so that cycle normalization (a yearly price
//! divided by twelve) never accumulates binary floating-point error. Rounding
//! happens only when an amount is displayed. Addition, subtraction and
//! multiplication saturate at the edge of the decimal range instead of
//! panicking.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in whole currency units with arbitrary decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a whole number of units
    ///
    /// # Examples
    /// ```
    /// use subtrack::models::Money;
    /// let amount = Money::from_units(390);
    /// assert_eq!(amount.to_string(), "$390.00");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a Money amount from cents (hundredths of a unit)
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Wrap an existing decimal
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying exact amount
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The larger of this amount and zero
    pub fn max_zero(self) -> Self {
        if self.is_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Round half away from zero to `dp` decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Lossy conversion for charting
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,680", "182.5"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let digits: String = rest.chars().filter(|c| *c != ',' && *c != '_').collect();

        if digits.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(&digits)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, two decimal places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_dp(2).0;
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.abs())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
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
        self.0 = self.0.saturating_add(other.0);
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
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, divisor: Decimal) -> Self {
        Self(self.0 / divisor)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units_and_cents() {
        assert_eq!(Money::from_units(10), Money::from_cents(1000));
        assert_eq!(Money::from_cents(1050).amount(), Decimal::new(105, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::parse("182.5").unwrap()), "$182.50");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let third = Money::from_units(100) / Decimal::from(3);
        assert_eq!(third.to_string(), "$33.33");
        let two_thirds = Money::from_units(200) / Decimal::from(3);
        assert_eq!(two_thirds.to_string(), "$66.67");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!(a + b, Money::from_units(1500));
        assert_eq!(a - b, Money::from_units(500));
        assert_eq!(-a, Money::from_units(-1000));
        assert_eq!(a / Decimal::from(4), Money::from_units(250));
        assert_eq!(b * Decimal::from(12), Money::from_units(6000));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max + max, max);
        assert_eq!(max * Decimal::from(12), max);
        assert_eq!(-max - max, Money::from_decimal(Decimal::MIN));

        let mut total = max;
        total += Money::from_units(1);
        assert_eq!(total, max);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_cents(-1050));
        assert_eq!(Money::parse("1,680").unwrap(), Money::from_units(1680));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_max_zero() {
        assert_eq!(Money::from_units(-5).max_zero(), Money::zero());
        assert_eq!(Money::from_units(5).max_zero(), Money::from_units(5));
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![
            Money::from_units(390),
            Money::from_units(1680),
            Money::parse("182.5").unwrap(),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Money::parse("2252.5").unwrap());
    }

    #[test]
    fn test_serialization_round_trip() {
        let m = Money::parse("182.50").unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let m: Money = serde_json::from_str("390").unwrap();
        assert_eq!(m, Money::from_units(390));
    }
}
