//! Cart domain types.

use mobile_shop_core::{CartId, CartItemId, UserId};

use super::Product;

/// A user's shopping cart with its lines joined against the catalog.
///
/// At most one cart exists per user; a cart that has had all lines removed
/// stays present with an empty item list until it is explicitly cleared.
#[derive(Debug, Clone)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// Lines in insertion order.
    pub items: Vec<CartItem>,
}

/// One product+quantity line within a cart.
#[derive(Debug, Clone)]
pub struct CartItem {
    /// Unique line ID.
    pub id: CartItemId,
    /// The referenced catalog entry.
    pub product: Product,
    /// Number of units. At least 1 on entry; never auto-pruned at zero.
    pub quantity: i32,
}
