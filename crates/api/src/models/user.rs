//! User domain types.

use chrono::{DateTime, Utc};

use mobile_shop_core::{Email, UserId, Username};

/// A registered shop user (domain type).
///
/// The password hash and issued token live here because the repository needs
/// them; the wire projection in `routes` deliberately has no hash field.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, immutable after registration.
    pub username: Username,
    /// Argon2 PHC-string hash of the password.
    pub password_hash: String,
    /// Contact email.
    pub email: Email,
    /// Shipping address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Bearer token issued at registration. Logins do not rotate it.
    pub token: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
