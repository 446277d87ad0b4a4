//! Order history domain types.

use chrono::{DateTime, Utc};

use mobile_shop_core::Price;

/// A snapshot of one purchased line, embedded in a user's order history.
///
/// Name and price are denormalized copies taken from the catalog at
/// order-placement time, not live references. Once appended, immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    /// When the purchase was made.
    pub date_created: DateTime<Utc>,
    /// Product name at purchase time.
    pub name: String,
    /// Unit price at purchase time, resolved from the catalog.
    pub price: Price,
    /// Number of units purchased.
    pub quantity: i32,
}
