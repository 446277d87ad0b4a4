//! Product repository.
//!
//! The catalog is read-only from this service's perspective; rows are seeded
//! out of band.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mobile_shop_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Database row for `product`.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    info: serde_json::Value,
    tags: serde_json::Value,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: Price::new(row.price),
            info: row.info,
            tags: row.tags,
        }
    }
}

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, info, tags
            FROM product
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Check whether a product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM product WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Resolve the authoritative price of a product by name.
    ///
    /// Used at order-placement time so client-submitted prices are never
    /// trusted. Product names carry a unique constraint, so a name resolves
    /// to at most one row. Returns `None` for unknown product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn price_by_name(&self, name: &str) -> Result<Option<Price>, RepositoryError> {
        let row: Option<(Decimal,)> = sqlx::query_as("SELECT price FROM product WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|(price,)| Price::new(price)))
    }
}
