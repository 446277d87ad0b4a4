//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health        - Liveness check
//! GET  /health/ready  - Readiness check (database ping)
//!
//! # Auth (public)
//! POST /register      - Register a new user (201, user projection)
//! POST /login         - Login (200, user projection; token not rotated)
//!
//! # Catalog (public)
//! GET  /catalog       - All products, unfiltered
//!
//! # Cart (bearer token required)
//! GET    /cart        - The user's cart with products joined, or null
//! POST   /cart        - Add a product (merges quantity if already present)
//! PUT    /cart        - Remove one line ({cartId, itemId})
//! DELETE /cart?id=    - Delete the whole cart
//!
//! # User (bearer token required)
//! GET  /user          - Current user projection incl. order history
//! PUT  /user          - Partial profile update (email/address/phone)
//!
//! # Order (bearer token required)
//! POST /order         - Append line items to the order history
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/catalog", get(catalog::list))
        .route(
            "/cart",
            get(cart::get_cart)
                .post(cart::add_item)
                .put(cart::remove_item)
                .delete(cart::clear_cart),
        )
        .route("/user", get(user::profile).put(user::update_profile))
        .route("/order", post(order::place_order))
}
