//! Order history repository.
//!
//! Appends are plain row inserts inside one transaction, so two concurrent
//! orders by the same user interleave instead of overwriting each other;
//! `seq` keeps the history in append order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use mobile_shop_core::{Price, UserId};

use super::RepositoryError;
use crate::models::OrderLineItem;

/// Database row for `order_line`.
#[derive(sqlx::FromRow)]
struct OrderLineRow {
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
    date_created: DateTime<Utc>,
}

impl From<OrderLineRow> for OrderLineItem {
    fn from(row: OrderLineRow) -> Self {
        Self {
            date_created: row.date_created,
            name: row.product_name,
            price: Price::new(row.unit_price),
            quantity: row.quantity,
        }
    }
}

/// Repository for order history operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a batch of line items to the user's order history.
    ///
    /// All lines land or none do.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn append(
        &self,
        user_id: UserId,
        lines: &[OrderLineItem],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_line (user_id, product_name, unit_price, quantity, date_created)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(user_id)
            .bind(&line.name)
            .bind(line.price.amount())
            .bind(line.quantity)
            .bind(line.date_created)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// List the user's order history in append order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderLineItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT product_name, unit_price, quantity, date_created
            FROM order_line
            WHERE user_id = $1
            ORDER BY seq
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderLineItem::from).collect())
    }
}
