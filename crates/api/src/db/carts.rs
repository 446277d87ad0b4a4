//! Cart repository.
//!
//! The merge-or-create decision for add-to-cart is a single SQL statement:
//! the cart upsert and the line upsert run atomically, so two concurrent
//! adds by the same user can never duplicate a line or drop each other's
//! write, whether they hit the same product or different ones.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mobile_shop_core::{CartId, CartItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem, Product};

/// Joined row for a cart and one of its lines (line columns nullable so an
/// emptied-out cart still comes back).
#[derive(sqlx::FromRow)]
struct CartLineRow {
    cart_id: Uuid,
    item_id: Option<Uuid>,
    quantity: Option<i32>,
    product_id: Option<Uuid>,
    name: Option<String>,
    price: Option<Decimal>,
    info: Option<serde_json::Value>,
    tags: Option<serde_json::Value>,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add `quantity` units of `product_id` to the user's cart.
    ///
    /// Creates the cart on first use, appends a new line for a product not
    /// yet in the cart, and increments the existing line's quantity when
    /// the product is already present. All three paths are one statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails (including
    /// a foreign-key violation for an unknown product).
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            WITH owned_cart AS (
                INSERT INTO cart (user_id)
                VALUES ($1)
                ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
                RETURNING id
            )
            INSERT INTO cart_item (cart_id, product_id, quantity)
            SELECT id, $2, $3 FROM owned_cart
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get the user's cart with each line joined to its full product record.
    ///
    /// Returns `None` when the user has no cart yet; that is a valid state,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a line references a
    /// product that cannot be loaded.
    pub async fn get_for_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT c.id AS cart_id,
                   i.id AS item_id, i.quantity,
                   p.id AS product_id, p.name, p.price, p.info, p.tags
            FROM cart c
            LEFT JOIN cart_item i ON i.cart_id = c.id
            LEFT JOIN product p ON p.id = i.product_id
            WHERE c.user_id = $1
            ORDER BY i.created_at
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let mut cart = Cart {
            id: CartId::new(first.cart_id),
            user_id,
            items: Vec::with_capacity(rows.len()),
        };

        for row in rows {
            // A cart with no lines yields one row with NULL line columns.
            let Some(item_id) = row.item_id else {
                continue;
            };

            let (Some(quantity), Some(product_id), Some(name), Some(price), Some(info), Some(tags)) =
                (row.quantity, row.product_id, row.name, row.price, row.info, row.tags)
            else {
                return Err(RepositoryError::DataCorruption(format!(
                    "cart line {item_id} has no joined product"
                )));
            };

            cart.items.push(CartItem {
                id: CartItemId::new(item_id),
                product: Product {
                    id: ProductId::new(product_id),
                    name,
                    price: Price::new(price),
                    info,
                    tags,
                },
                quantity,
            });
        }

        Ok(Some(cart))
    }

    /// Remove one line from a cart.
    ///
    /// The predicate binds the authenticated user's id, so a cart id that
    /// belongs to someone else is a silent no-op, as is a missing line —
    /// removal is idempotent either way. The cart document itself survives
    /// even when its last line goes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_item
            WHERE id = $1
              AND cart_id IN (SELECT id FROM cart WHERE id = $2 AND user_id = $3)
            ",
        )
        .bind(item_id)
        .bind(cart_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete an entire cart by id, lines included.
    ///
    /// Ownership is enforced the same way as `remove_item`: only the
    /// authenticated owner's cart matches the predicate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, user_id: UserId, cart_id: CartId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart WHERE id = $1 AND user_id = $2")
            .bind(cart_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
