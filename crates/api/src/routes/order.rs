//! Order route handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::OrderLineItem;
use crate::state::AppState;

/// One purchased line on the wire, in both requests and the user projection.
///
/// The client submits a price, but it is never trusted: the handler
/// re-resolves the authoritative price from the catalog before persisting.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date_created: DateTime<Utc>,
}

impl From<OrderLineItem> for OrderLinePayload {
    fn from(line: OrderLineItem) -> Self {
        Self {
            name: line.name,
            price: line.price.amount(),
            quantity: line.quantity,
            date_created: line.date_created,
        }
    }
}

/// Order placement request body.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub order: Vec<OrderLinePayload>,
}

/// Handle POST /order.
///
/// Appends the submitted lines to the user's history. Line items naming
/// unknown products are rejected outright; known ones are re-priced from
/// the catalog.
pub async fn place_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<StatusCode> {
    let products = ProductRepository::new(state.pool());

    let mut lines = Vec::with_capacity(request.order.len());
    for payload in &request.order {
        if payload.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "quantity must be at least 1 for '{}'",
                payload.name
            )));
        }

        let price = products
            .price_by_name(&payload.name)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("unknown product: {}", payload.name)))?;

        if price.amount() != payload.price {
            tracing::warn!(
                product = %payload.name,
                submitted = %payload.price,
                catalog = %price,
                "client-submitted price ignored"
            );
        }

        lines.push(OrderLineItem {
            date_created: payload.date_created,
            name: payload.name.clone(),
            price,
            quantity: payload.quantity,
        });
    }

    OrderRepository::new(state.pool())
        .append(user.id, &lines)
        .await?;

    tracing::info!(user_id = %user.id, lines = lines.len(), "order appended");

    Ok(StatusCode::OK)
}
