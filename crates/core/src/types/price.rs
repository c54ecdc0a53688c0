//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the store currency.
///
/// The catalog API sends prices as JSON numbers (`9.99`); they are held as a
/// [`Decimal`] so they never pick up binary floating point noise.
///
/// Displays with a leading `$` and the shortest decimal form, so `10.0`
/// renders as `$10` and `9.90` as `$9.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self(Decimal::ZERO)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_json_number() {
        let price: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(price.to_string(), "$9.99");
    }

    #[test]
    fn test_price_from_json_integer() {
        let price: Price = serde_json::from_str("1899").unwrap();
        assert_eq!(price.to_string(), "$1899");
    }

    #[test]
    fn test_price_display_drops_trailing_zeros() {
        let price = Price::new(Decimal::new(1000, 2));
        assert_eq!(price.to_string(), "$10");

        let price = Price::new(Decimal::new(990, 2));
        assert_eq!(price.to_string(), "$9.9");
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::new(Decimal::new(5, 0)) < Price::new(Decimal::new(999, 2)));
    }
}
