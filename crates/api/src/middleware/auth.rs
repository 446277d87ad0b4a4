//! Bearer-token authentication extractor.
//!
//! Resolves a request's identity once, before any handler logic runs:
//! the `Authorization: Bearer <token>` header is verified, the embedded
//! subject (username) is looked up, and the persisted user is handed to
//! the handler. Any failure short-circuits with 401.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_owned()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Malformed authorization header".to_owned()))?;

        let username = state
            .tokens()
            .verify(token)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_owned()))?;

        let user = UserRepository::new(state.pool())
            .get_by_username(&username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_owned()))?;

        Ok(Self(user))
    }
}
