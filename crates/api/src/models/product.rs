//! Product domain types.

use mobile_shop_core::{Price, ProductId};

/// A catalog entry, read-only from this service's perspective.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name, also the lookup key for order re-pricing.
    pub name: String,
    /// Authoritative catalog price.
    pub price: Price,
    /// Free-form descriptive spec fields (display, camera, CPU, ...).
    pub info: serde_json::Value,
    /// Tag set used by clients for filtering.
    pub tags: serde_json::Value,
}
