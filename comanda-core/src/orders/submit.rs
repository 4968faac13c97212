//! Order submission workflow
//!
//! Converts a [`Cart`] plus a table number into a persisted order header
//! and its line items. Header and lines are written in one transaction:
//! a failed line write rolls the header back too, and the cart is left
//! intact so the operator can retry.

use crate::cart::{Cart, tax_inclusive_total};
use crate::core::{PosError, PosResult};
use crate::db::models::{Order, OrderLine};
use crate::db::{DbService, WALK_IN_CUSTOMER_ID, repository};
use crate::util::{now_millis, snowflake_id};

/// Attempts at regenerating a colliding snowflake before giving up.
const MAX_ID_ATTEMPTS: u32 = 3;

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Order submission and lifecycle service.
#[derive(Clone)]
pub struct OrderService {
    db: DbService,
}

impl OrderService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub(crate) fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }

    /// Submit a cart against a table, returning the new order id.
    ///
    /// An absent `customer_id` persists the walk-in placeholder — an
    /// order row never carries a null customer. On success the cart is
    /// cleared; on any failure it is untouched and nothing was written.
    pub async fn submit(
        &self,
        cart: &mut Cart,
        table_number: i64,
        staff_id: i64,
        customer_id: Option<i64>,
    ) -> PosResult<i64> {
        if cart.is_empty() {
            return Err(PosError::Validation("Cannot submit an empty cart".into()));
        }

        let table = repository::dining_table::find_by_number(self.pool(), table_number)
            .await?
            .ok_or_else(|| PosError::NotFound(format!("Table {table_number} not found")))?;

        let totals = cart.totals();
        let customer_id = customer_id.unwrap_or(WALK_IN_CUSTOMER_ID);

        let order_id = self
            .persist(cart, table.id, staff_id, customer_id, totals.grand_total)
            .await?;

        cart.clear();
        Ok(order_id)
    }

    /// One transaction: header insert, then one line insert per cart
    /// line. A unique-key collision on a fresh snowflake regenerates and
    /// retries the whole batch; everything else rolls back and surfaces
    /// as `SubmissionFailed`.
    async fn persist(
        &self,
        cart: &Cart,
        table_id: i64,
        staff_id: i64,
        customer_id: i64,
        total: i64,
    ) -> PosResult<i64> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let order_id = snowflake_id();
            let now = now_millis();

            let mut tx = self.db.pool.begin().await?;

            let header = sqlx::query(
                "INSERT INTO orders (id, customer_id, table_id, staff_id, status, total, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, 'PLACED', ?, ?, ?)",
            )
            .bind(order_id)
            .bind(customer_id)
            .bind(table_id)
            .bind(staff_id)
            .bind(total)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await;

            match header {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    // Another order landed on the same snowflake; dropping
                    // the transaction rolls back, then regenerate.
                    drop(tx);
                    continue;
                }
                Err(e) => {
                    return Err(PosError::SubmissionFailed(format!(
                        "order header write failed: {e}"
                    )));
                }
            }

            for line in cart.lines() {
                self.insert_line(&mut tx, order_id, line, now).await?;
            }

            tx.commit().await.map_err(|e| {
                PosError::SubmissionFailed(format!("order commit failed: {e}"))
            })?;
            return Ok(order_id);
        }

        Err(PosError::SubmissionFailed(format!(
            "order id generation collided {MAX_ID_ATTEMPTS} times"
        )))
    }

    async fn insert_line(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        order_id: i64,
        line: &crate::cart::CartLine,
        now: i64,
    ) -> PosResult<()> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let result = sqlx::query(
                "INSERT INTO order_item (id, order_id, menu_item_id, quantity, unit_price, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(snowflake_id())
            .bind(order_id)
            .bind(line.menu_item_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(now)
            .execute(&mut **tx)
            .await;

            match result {
                Ok(_) => return Ok(()),
                Err(e) if is_unique_violation(&e) => continue,
                Err(e) => {
                    return Err(PosError::SubmissionFailed(format!(
                        "order line write failed: {e}"
                    )));
                }
            }
        }
        Err(PosError::SubmissionFailed(format!(
            "line id generation collided {MAX_ID_ATTEMPTS} times"
        )))
    }

    /// Re-derive an order's total from its stored lines and persist it.
    /// Uses the same truncating tax computation as the cart, so an
    /// untouched order's total is a fixed point.
    pub async fn recompute_total(&self, order_id: i64) -> PosResult<i64> {
        let subtotal: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(quantity * unit_price) FROM order_item WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_one(self.pool())
        .await?;
        let total = tax_inclusive_total(subtotal.unwrap_or(0));

        let rows = sqlx::query("UPDATE orders SET total = ?, updated_at = ? WHERE id = ?")
            .bind(total)
            .bind(now_millis())
            .bind(order_id)
            .execute(self.pool())
            .await?;
        if rows.rows_affected() == 0 {
            return Err(PosError::NotFound(format!("Order {order_id} not found")));
        }
        Ok(total)
    }

    pub async fn find_order(&self, order_id: i64) -> PosResult<Order> {
        repository::order::find_by_id(self.pool(), order_id)
            .await?
            .ok_or_else(|| PosError::NotFound(format!("Order {order_id} not found")))
    }

    pub async fn order_lines(&self, order_id: i64) -> PosResult<Vec<OrderLine>> {
        repository::order::find_lines(self.pool(), order_id).await
    }
}
