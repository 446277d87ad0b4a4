//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog price.
///
/// Amounts are in the shop's single currency's standard unit (e.g. dollars,
/// not cents); decimal arithmetic avoids floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let cheap = Price::new(Decimal::new(100, 0));
        let pricey = Price::new(Decimal::new(700, 0));
        assert!(cheap < pricey);
    }

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(70050, 2));
        assert_eq!(price.to_string(), "700.50");
    }
}
