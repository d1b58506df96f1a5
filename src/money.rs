//! Exact decimal currency amounts.
//!
//! Arithmetic on [`Money`] never rounds. Rounding to cents happens only where a
//! caller asks for it via [`Money::round_cents`], always half-to-even, so the
//! fair share and each balance are rounded exactly once.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A currency amount backed by `rust_decimal::Decimal`.
///
/// Rendered with exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use splitstack::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Number of decimal places amounts are rounded and rendered to.
    pub const CENTS_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Rounds to cents using round-half-to-even. Never yields a negative zero.
    pub fn round_cents(self) -> Self {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::CENTS_SCALE, RoundingStrategy::MidpointNearestEven);
        if rounded.is_zero() {
            return Money::ZERO;
        }
        Money(rounded)
    }

    /// Divides evenly into `parts` shares, unrounded. Returns zero for zero parts.
    pub fn split(self, parts: usize) -> Self {
        if parts == 0 {
            return Money::ZERO;
        }
        Money(self.0 / Decimal::from(parts))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// Addition that returns `None` instead of overflowing.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Subtraction that returns `None` instead of overflowing.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cents = self.round_cents().0;
        cents.rescale(Self::CENTS_SCALE);
        write!(f, "{}", cents)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_display_renders_two_places() {
        assert_eq!(money("1").to_string(), "1.00");
        assert_eq!(money("1.5").to_string(), "1.50");
        assert_eq!(money("  2.25  ").to_string(), "2.25");
        assert_eq!(money("-30").to_string(), "-30.00");
        assert_eq!(money("-0.004").to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let third = money("100").split(3);
        assert_ne!(third + third + third, money("99.99"));
        assert_eq!((third + third + third).round_cents(), money("100"));
    }

    #[test]
    fn test_round_cents_is_half_even() {
        assert_eq!(money("0.125").round_cents(), money("0.12"));
        assert_eq!(money("0.135").round_cents(), money("0.14"));
        assert_eq!(money("-0.125").round_cents(), money("-0.12"));
        assert_eq!(money("33.333").round_cents(), money("33.33"));
    }

    #[test]
    fn test_split_by_zero_is_zero() {
        assert!(money("90").split(0).is_zero());
        assert_eq!(money("90").split(3), money("30"));
    }

    #[test]
    fn test_sign_helpers() {
        assert!(money("-0.01").is_negative());
        assert!(money("0.01").is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert_eq!(money("-4.5").abs(), money("4.5"));
        assert_eq!(-money("4.5"), money("-4.5"));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let max = Money(Decimal::MAX);
        assert_eq!(max.checked_add(money("1")), None);
        assert_eq!((-max).checked_sub(money("1")), None);
        assert_eq!(money("1.25").checked_add(money("2")), Some(money("3.25")));
        assert_eq!(money("1.25").checked_sub(money("2")), Some(money("-0.75")));
    }

    #[test]
    fn test_sum() {
        let amounts = [money("1.10"), money("2.20"), money("-0.30")];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, money("3.00"));
    }
}
