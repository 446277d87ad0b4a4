//! Cart route handlers.
//!
//! All four operations resolve the cart through the authenticated user, so
//! a client-supplied cart id is never sufficient authorization on its own:
//! mutating someone else's cart is a silent no-op.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use mobile_shop_core::{CartId, CartItemId, ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{Cart, CartItem};
use crate::routes::catalog::ProductResponse;
use crate::state::AppState;

// =============================================================================
// Wire Types
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product: ProductId,
    pub quantity: i32,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub cart_id: CartId,
    pub item_id: CartItemId,
}

/// Query parameters for DELETE /cart.
#[derive(Debug, Deserialize)]
pub struct ClearCartQuery {
    pub id: CartId,
}

/// A cart on the wire, lines joined with their products.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: CartId,
    pub user: UserId,
    pub items: Vec<CartItemResponse>,
}

/// One cart line on the wire.
#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub id: CartItemId,
    pub product: ProductResponse,
    pub quantity: i32,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            user: cart.user_id,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            product: ProductResponse::from(item.product),
            quantity: item.quantity,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle GET /cart.
///
/// A user without a cart gets a JSON `null` success payload, not an error.
pub async fn get_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Option<CartResponse>>> {
    let cart = CartRepository::new(state.pool())
        .get_for_user(user.id)
        .await?;

    Ok(Json(cart.map(CartResponse::from)))
}

/// Handle POST /cart.
///
/// Adding a product already in the cart merges quantities into the existing
/// line; otherwise a line is appended, creating the cart first if needed.
pub async fn add_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<StatusCode> {
    if request.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_owned(),
        ));
    }

    if !ProductRepository::new(state.pool())
        .exists(request.product)
        .await?
    {
        return Err(AppError::BadRequest(format!(
            "unknown product: {}",
            request.product
        )));
    }

    CartRepository::new(state.pool())
        .add_item(user.id, request.product, request.quantity)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Handle PUT /cart (remove one line).
///
/// Idempotent: removing an absent line leaves the cart unchanged.
pub async fn remove_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<StatusCode> {
    CartRepository::new(state.pool())
        .remove_item(user.id, request.cart_id, request.item_id)
        .await?;

    Ok(StatusCode::OK)
}

/// Handle DELETE /cart?id=.
pub async fn clear_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ClearCartQuery>,
) -> Result<StatusCode> {
    CartRepository::new(state.pool())
        .delete(user.id, query.id)
        .await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mobile_shop_core::Price;
    use rust_decimal::Decimal;

    #[test]
    fn test_remove_request_uses_camel_case() {
        let cart_id = CartId::generate();
        let item_id = CartItemId::generate();

        let request: RemoveFromCartRequest = serde_json::from_value(serde_json::json!({
            "cartId": cart_id,
            "itemId": item_id,
        }))
        .unwrap();

        assert_eq!(request.cart_id, cart_id);
        assert_eq!(request.item_id, item_id);
    }

    #[test]
    fn test_cart_response_shape() {
        let cart = Cart {
            id: CartId::generate(),
            user_id: UserId::generate(),
            items: vec![CartItem {
                id: CartItemId::generate(),
                product: crate::models::Product {
                    id: ProductId::generate(),
                    name: "P1".to_owned(),
                    price: Price::new(Decimal::new(700, 0)),
                    info: serde_json::json!({}),
                    tags: serde_json::json!({}),
                },
                quantity: 3,
            }],
        };

        let json = serde_json::to_value(CartResponse::from(cart)).unwrap();
        assert_eq!(json["items"][0]["quantity"], 3);
        assert_eq!(json["items"][0]["product"]["name"], "P1");
    }

    #[test]
    fn test_absent_cart_serializes_as_null() {
        let body: Option<CartResponse> = None;
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::Value::Null);
    }
}
