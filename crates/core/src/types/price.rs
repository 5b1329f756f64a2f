//! Type-safe price representation using decimal arithmetic.
//!
//! The StyleStore server stores prices as SQL `DECIMAL(10, 2)` and its JSON
//! encoder emits them as strings (`"15000.00"`), while seeded fixtures and
//! other backends send plain numbers. [`Price`] accepts both.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol used by the storefront (Nigerian Naira).
pub const CURRENCY_SYMBOL: &str = "₦";

/// A price in Naira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Formats as `₦1,234.50`: two decimal places, comma-grouped thousands.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.2}", rounded.abs());
        let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}{CURRENCY_SYMBOL}{grouped}.{frac}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn price(s: &str) -> Price {
        Price::new(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(price("15000").to_string(), "₦15,000.00");
        assert_eq!(price("1234567.5").to_string(), "₦1,234,567.50");
        assert_eq!(price("999.999").to_string(), "₦1,000.00");
        assert_eq!(price("0").to_string(), "₦0.00");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(price("-2500.1").to_string(), "-₦2,500.10");
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let from_str: Price = serde_json::from_str("\"15000.00\"").unwrap();
        let from_num: Price = serde_json::from_str("15000").unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_str.amount(), Decimal::new(15000, 0));
    }
}
