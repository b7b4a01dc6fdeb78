//! Type-safe price representation using decimal arithmetic.
//!
//! Everything in the shop is priced in US dollars, so the wrapper keeps a
//! single `Decimal` amount and formats with a `$` prefix. Money never
//! touches floating point.

use core::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A USD price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole cents (e.g., `650` is $6.50).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a price from whole dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::new(dollars, 0))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// The whole-dollar part, truncated (used for paypal.me amount links).
    #[must_use]
    pub fn whole_dollars(&self) -> i64 {
        self.0.trunc().to_i64().unwrap_or(0)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().trim_start_matches('$').parse::<Decimal>()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from_dollars(10).to_string(), "$10.00");
        assert_eq!(Price::from_cents(650).to_string(), "$6.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_times() {
        let unit = Price::from_dollars(10);
        assert_eq!(unit.times(3), Price::from_dollars(30));
        assert_eq!(unit.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_dollars(20), Price::from_cents(800)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2800));
    }

    #[test]
    fn test_whole_dollars() {
        assert_eq!(Price::from_cents(3899).whole_dollars(), 38);
        assert_eq!(Price::from_dollars(38).whole_dollars(), 38);
    }

    #[test]
    fn test_parse() {
        assert_eq!("10.00".parse::<Price>().unwrap(), Price::from_dollars(10));
        assert_eq!("$6.50".parse::<Price>().unwrap(), Price::from_cents(650));
        assert!("not-a-price".parse::<Price>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Price::from_dollars(50) > Price::from_cents(4999));
        assert!(!Price::from_dollars(10).is_negative());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Price::from_cents(1050)).unwrap();
        assert_eq!(json, "\"10.50\"");
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Price::from_cents(1050));
    }
}
