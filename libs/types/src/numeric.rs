//! Fixed-point decimal type for monetary amounts
//!
//! Uses rust_decimal for exact arithmetic: sums do not depend on fold order,
//! so aggregated totals are reproducible bit-for-bit across runs.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationReason;

/// Fractional digits kept on computed means.
pub const MEAN_SCALE: u32 = 10;

/// Largest amount accepted on a single row.
///
/// Keeps any in-memory total far below `Decimal::MAX`, so sums never overflow.
pub const MAX_ROW_AMOUNT: u64 = 1_000_000_000_000_000;

/// `total / count` rounded to `MEAN_SCALE` places, midpoint away from zero.
///
/// Returns `None` when `count` is zero.
pub fn mean(total: Decimal, count: u64) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    let mean = total.checked_div(Decimal::from(count))?;
    Some(
        mean.round_dp_with_strategy(MEAN_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
    )
}

/// A non-negative monetary amount (sale price, commission, or a total of them).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wrap a decimal, rejecting negative amounts.
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value < Decimal::ZERO {
            None
        } else {
            Some(Self(value.normalize()))
        }
    }

    /// Whole-unit amount, mostly for tests and fixtures.
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse a raw cell.
    ///
    /// Accepts plain decimals ("31932.00") and scientific notation ("3.1932e4").
    pub fn parse(raw: &str) -> Result<Self, ValidationReason> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationReason::Empty);
        }
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ValidationReason::NotNumeric)?;
        Self::try_new(value)
            .ok_or(ValidationReason::Negative)?
            .check_row_amount()
    }

    /// Check an amount read from a single row against `MAX_ROW_AMOUNT`.
    pub fn check_row_amount(self) -> Result<Self, ValidationReason> {
        if self.0 > Decimal::from(MAX_ROW_AMOUNT) {
            return Err(ValidationReason::TooLarge { max: MAX_ROW_AMOUNT });
        }
        Ok(self)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Arithmetic mean of `count` amounts summing to `self`.
    ///
    /// Returns `None` when `count` is zero.
    pub fn mean_over(self, count: u64) -> Option<Money> {
        mean(self.0, count).map(Money)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationReason;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(ValidationReason::Negative)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money((self.0 + rhs.0).normalize())
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = (self.0 + rhs.0).normalize();
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain_and_scientific() {
        assert_eq!(Money::parse("31932.00").unwrap(), Money::from_u64(31932));
        assert_eq!(Money::parse(" 3.1932e4 ").unwrap(), Money::from_u64(31932));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Money::parse(""), Err(ValidationReason::Empty));
        assert_eq!(Money::parse("abc"), Err(ValidationReason::NotNumeric));
        assert_eq!(Money::parse("NaN"), Err(ValidationReason::NotNumeric));
        assert_eq!(Money::parse("inf"), Err(ValidationReason::NotNumeric));
        assert_eq!(Money::parse("-1.5"), Err(ValidationReason::Negative));
    }

    #[test]
    fn test_parse_rejects_oversized_amount() {
        assert!(Money::parse("1000000000000000").is_ok());
        assert_eq!(
            Money::parse("50000000000000000000000000000"),
            Err(ValidationReason::TooLarge { max: MAX_ROW_AMOUNT })
        );
        assert_eq!(
            Money::parse("1000000000000000.01"),
            Err(ValidationReason::TooLarge { max: MAX_ROW_AMOUNT })
        );
    }

    #[test]
    fn test_max_row_amounts_sum_without_overflow() {
        let max = Money::parse("1000000000000000").unwrap();
        let total: Money = std::iter::repeat(max).take(10_000).sum();
        assert_eq!(total, Money::from_u64(MAX_ROW_AMOUNT * 10_000));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let money: Money = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(money.to_string(), "12.5");
        assert!(serde_json::from_str::<Money>("\"-500\"").is_err());
    }

    #[test]
    fn test_mean_is_exact_division() {
        let total = Money::from_u64(1000);
        assert_eq!(total.mean_over(4), Some(Money::from_u64(250)));
        assert_eq!(total.mean_over(0), None);

        let third = Money::from_u64(1).mean_over(3).unwrap();
        assert_eq!(third.to_string(), "0.3333333333");
        assert_eq!(mean(Decimal::from(2), 3).unwrap().to_string(), "0.6666666667");
    }

    #[test]
    fn test_serializes_as_string() {
        let money = Money::parse("1234.50").unwrap();
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"1234.5\"");
    }

    proptest! {
        #[test]
        fn prop_sum_independent_of_order(
            cents in proptest::collection::vec(0u64..10_000_000, 0..50)
        ) {
            let amounts: Vec<Money> = cents
                .iter()
                .map(|c| Money::try_new(Decimal::new(*c as i64, 2)).unwrap())
                .collect();
            let forward: Money = amounts.iter().sum();
            let backward: Money = amounts.iter().rev().sum();
            prop_assert_eq!(forward, backward);
        }
    }
}
