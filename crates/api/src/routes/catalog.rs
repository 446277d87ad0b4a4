//! Catalog route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use mobile_shop_core::{Price, ProductId};

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// A catalog entry on the wire.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub info: serde_json::Value,
    pub tags: serde_json::Value,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            info: product.info,
            tags: product.tags,
        }
    }
}

/// Handle GET /catalog.
///
/// Returns every product unfiltered; no pagination, no query parameters.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}
