//! User profile route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;

use mobile_shop_core::Email;

use crate::db::orders::OrderRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::routes::auth::UserResponse;
use crate::state::AppState;

/// Partial profile update request body. Absent fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Handle GET /user.
pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserResponse>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(UserResponse::from_parts(user, orders)))
}

/// Handle PUT /user.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>> {
    let email = request
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    UserRepository::new(state.pool())
        .update_profile(
            user.id,
            email.as_ref(),
            request.address.as_deref(),
            request.phone.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "message": "User updated" })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_fields_are_optional() {
        let request: UpdateUserRequest = serde_json::from_str(r#"{"email":"new@b.c"}"#).unwrap();
        assert_eq!(request.email.as_deref(), Some("new@b.c"));
        assert!(request.address.is_none());
        assert!(request.phone.is_none());
    }
}
