//! User repository for database operations.
//!
//! Queries use the runtime-checked sqlx API so the crate builds without a
//! live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use mobile_shop_core::{Email, UserId, Username};

use super::{RepositoryError, map_unique_violation};
use crate::models::User;

/// Database row for `shop_user`.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    email: String,
    address: String,
    phone: String,
    token: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert a raw row into the domain type, validating stored fields.
    fn into_user(self) -> Result<User, RepositoryError> {
        let username = Username::parse(&self.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            username,
            password_hash: self.password_hash,
            email,
            address: self.address,
            phone: self.phone,
            token: self.token,
            created_at: self.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their login name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password_hash, email, address, phone, token, created_at
            FROM shop_user
            WHERE username = $1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password_hash, email, address, phone, token, created_at
            FROM shop_user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Create a new user.
    ///
    /// The unique constraint on `username` makes this safe against concurrent
    /// duplicate registration: the loser of the race gets `Conflict`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        email: &Email,
        address: &str,
        phone: &str,
        token: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO shop_user (username, password_hash, email, address, phone, token)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, password_hash, email, address, phone, token, created_at
            ",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(email.as_str())
        .bind(address)
        .bind(phone)
        .bind(token)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username already exists"))?;

        row.into_user()
    }

    /// Partially update a user's contact profile.
    ///
    /// `None` fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_profile(
        &self,
        id: UserId,
        email: Option<&Email>,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE shop_user
            SET email   = COALESCE($2, email),
                address = COALESCE($3, address),
                phone   = COALESCE($4, phone)
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(email.map(Email::as_str))
        .bind(address)
        .bind(phone)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
