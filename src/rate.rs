//! Percentage rates applied to a member's share.
//!
//! A malformed rate is never propagated: anything missing, non-numeric or
//! outside `[0, 100]` becomes zero and is logged at warn level.

use log::warn;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Platform fee applied when the caller does not supply one.
pub const DEFAULT_PLATFORM_FEE_PERCENT: &str = "2.5";

/// Discount applied when the caller does not supply one.
pub const DEFAULT_DISCOUNT_PERCENT: &str = "0";

/// A percentage guaranteed to lie within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Percent(Decimal::ZERO);

    /// Normalizes a stored rate, substituting zero for out-of-range values.
    ///
    /// `label` names the rate in the log output.
    pub fn sanitize(raw: Decimal, label: &str) -> Self {
        if raw < Decimal::ZERO || raw > Decimal::ONE_HUNDRED {
            warn!("Invalid {} rate {}%, using 0%", label, raw);
            return Percent::ZERO;
        }
        Percent(raw.normalize())
    }

    /// Parses user-entered text into a rate.
    ///
    /// Missing, blank or non-numeric input becomes zero, as does any value
    /// rejected by [`Percent::sanitize`].
    pub fn parse(input: Option<&str>, label: &str) -> Self {
        let trimmed = match input.map(str::trim) {
            Some(s) if !s.is_empty() => s.trim_end_matches('%').trim_end(),
            _ => {
                warn!("Missing {} rate, using 0%", label);
                return Percent::ZERO;
            }
        };

        match Decimal::from_str(trimmed) {
            Ok(raw) => Percent::sanitize(raw, label),
            Err(_) => {
                warn!("Non-numeric {} rate {:?}, using 0%", label, trimmed);
                Percent::ZERO
            }
        }
    }

    /// Returns the rate as a decimal number of percent, e.g. `2.5`.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the rate is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
