//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use mobile_shop_core::UserId;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::models::User;
use crate::routes::order::OrderLinePayload;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

// =============================================================================
// Wire Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// User projection returned by register, login and GET /user.
///
/// Deliberately has no password-hash field, so the stored credential can
/// never leak into a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub token: String,
    pub orders: Vec<OrderLinePayload>,
}

impl UserResponse {
    /// Build the projection from a stored user and their order history.
    #[must_use]
    pub fn from_parts(user: User, orders: Vec<crate::models::OrderLineItem>) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
            address: user.address,
            phone: user.phone,
            token: user.token,
            orders: orders.into_iter().map(OrderLinePayload::from).collect(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle POST /register.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let user = auth
        .register(Registration {
            username: &request.username,
            password: &request.password,
            email: &request.email,
            address: &request.address,
            phone: &request.phone,
        })
        .await?;

    tracing::info!(username = %user.username, "user registered");

    // A fresh registration has an empty order history.
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_parts(user, Vec::new())),
    ))
}

/// Handle POST /login.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    let user = auth.login(&request.username, &request.password).await?;

    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(UserResponse::from_parts(user, orders)))
}
