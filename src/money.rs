//! Fixed-point money type with 4 decimal places of internal precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so that repeated
//! recomputation of a split always yields the same amounts. Rounding to
//! cents only happens when an amount is rendered for display.

use crate::rate::Percent;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// A monetary amount held at exactly 4 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use split_engine::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.5000");
/// assert_eq!(amount.to_display_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places kept internally.
    pub const SCALE: u32 = 4;

    /// The number of decimal places shown to people.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Whole currency units in [`Money::max_amount`]. At 4 places this keeps
    /// every amount, and twice any amount, exactly representable.
    pub const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000_000;

    /// Creates a new `Money` from a `Decimal`, rounding half-to-even to 4 places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Builds an amount from a count of ten-thousandths.
    pub fn from_units(units: i128) -> Self {
        Money(Decimal::from_i128_with_scale(units, Self::SCALE))
    }

    /// The amount as a count of ten-thousandths.
    ///
    /// Values too large to be held at 4 places keep a smaller scale; the
    /// mantissa is widened back to ten-thousandths for those.
    pub fn units(&self) -> i128 {
        let missing_places = Self::SCALE.saturating_sub(self.0.scale());
        self.0.mantissa() * 10_i128.pow(missing_places)
    }

    /// Largest magnitude the engine accepts: one quadrillion.
    pub fn max_amount() -> Money {
        Money::new(Decimal::from(Self::MAX_WHOLE_UNITS))
    }

    /// Returns `true` if the magnitude does not exceed [`Money::max_amount`].
    pub fn is_within_bounds(&self) -> bool {
        self.0.abs() <= Decimal::from(Self::MAX_WHOLE_UNITS)
    }

    /// `self + rhs`, or `None` if the sum leaves the accepted range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        let sum = Money::new(self.0.checked_add(rhs.0)?);
        sum.is_within_bounds().then_some(sum)
    }

    /// `self * quantity`, or `None` if the product leaves the accepted range.
    pub fn checked_times(self, quantity: u32) -> Option<Money> {
        let product = Money::new(self.0.checked_mul(Decimal::from(quantity))?);
        product.is_within_bounds().then_some(product)
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `self * quantity`, used for extended item prices.
    ///
    /// Panics on overflow; amounts from outside the crate go through
    /// [`Money::checked_times`] first.
    pub fn times(self, quantity: u32) -> Self {
        Money::new(self.0 * Decimal::from(quantity))
    }

    /// `self * percent / 100`, rounded half-to-even to 4 places.
    pub fn percent_of(self, percent: Percent) -> Self {
        Money::new(self.0 * percent.as_decimal() / Decimal::ONE_HUNDRED)
    }

    /// Divides the amount into `parts` shares that sum exactly to `self`.
    ///
    /// Every share receives the floor of the even split in whole units; the
    /// leftover units go one each to the leading shares. Returns an empty
    /// vector when `parts` is zero. Expects an amount within
    /// [`Money::max_amount`].
    pub fn split_evenly(self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let count = parts as i128;
        let base = self.units().div_euclid(count);
        let remainder = self.units().rem_euclid(count);

        (0..count)
            .map(|idx| Money::from_units(if idx < remainder { base + 1 } else { base }))
            .collect()
    }

    /// The amount rounded half away from zero to cents.
    ///
    /// A value that rounds to zero comes back as plain zero, never `-0.00`.
    pub fn to_cents(&self) -> Money {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            return Money::ZERO;
        }
        Money::new(rounded)
    }

    /// Formats the amount rounded to cents, e.g. `"16.50"`.
    pub fn to_display_string(&self) -> String {
        format!("{:.2}", self.to_cents().0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount = Money::new(Decimal::from_str(trimmed)?);
        if !amount.is_within_bounds() {
            return Err(if amount.is_negative() {
                rust_decimal::Error::LessThanMinimumPossibleValue
            } else {
                rust_decimal::Error::ExceedsMaximumPossibleValue
            });
        }
        Ok(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money::new(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money::new(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.4}", self.0))
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
