//! Domain types.
//!
//! These types represent validated domain objects separate from database row
//! types and from the wire-level request/response structs in `routes`.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::OrderLineItem;
pub use product::Product;
pub use user::User;
