//! Fixed-precision money type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and pins every amount to two
//! fractional digits, so sums and comparisons are exact.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while turning untrusted text into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input was empty after trimming.
    #[error("amount is empty")]
    Empty,

    /// Input is not a decimal number.
    #[error("not a number: {0}")]
    NotANumber(String),

    /// Input carries more fractional digits than the money scale allows.
    /// Holds the exact value that was read.
    #[error("amount {0} has more than two decimal places")]
    TooPrecise(Decimal),
}

/// A signed monetary amount with exactly two decimal places of granularity.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
/// Deserialization goes through [`Money::try_from_decimal`], so a value finer
/// than one cent is rejected rather than stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Number of fractional digits every amount is normalized to.
    pub const SCALE: u32 = 2;

    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Smallest positive amount (0.01).
    pub const MIN_UNIT: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    /// Creates money from a decimal, rejecting values finer than [`Self::SCALE`].
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::TooPrecise` if rounding to two places would change the value.
    pub fn try_from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        let mut scaled = amount;
        scaled.rescale(Self::SCALE);
        if scaled == amount {
            Ok(Self(scaled))
        } else {
            Err(MoneyError::TooPrecise(amount))
        }
    }

    /// Creates money from a whole number of minor units (cents).
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, Self::SCALE))
    }

    /// Parses user-supplied text such as `"1,250.50"` or `" 12 "`.
    ///
    /// Thousands separators and surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, not numeric, or too precise.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        if cleaned.is_empty() {
            return Err(MoneyError::Empty);
        }

        let amount = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|_| MoneyError::NotANumber(input.trim().to_string()))?;

        Self::try_from_decimal(amount.normalize())
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Multiplies by a decimal factor, keeping the full product precision.
    ///
    /// The result is a raw decimal because a scaled amount is generally not
    /// representable at money granularity.
    #[must_use]
    pub fn scaled_by(&self, factor: Decimal) -> Decimal {
        self.0 * factor
    }

    /// Share of `total` this amount represents, as a fraction in `[0, 1]`
    /// for non-negative inputs. Defined as zero when `total` is zero.
    #[must_use]
    pub fn ratio_of(&self, total: Self) -> Decimal {
        if total.is_zero() {
            Decimal::ZERO
        } else {
            self.0 / total.0
        }
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_from_decimal(value)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
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
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut shown = self.0;
        shown.rescale(Self::SCALE);
        write!(f, "{shown}")
    }
}
