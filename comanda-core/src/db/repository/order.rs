//! Order Repository
//!
//! Reads and single-row guarded updates on `orders` / `order_item`. The
//! submission workflow writes headers and lines itself inside one
//! transaction ([`crate::orders::OrderService::submit`]).

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::core::PosResult;
use crate::db::models::{KitchenTicket, Order, OrderLine, OrderStatus, TicketLine};
use crate::util::now_millis;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PosResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, customer_id, table_id, staff_id, status, total, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn find_lines(pool: &SqlitePool, order_id: i64) -> PosResult<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT id, order_id, menu_item_id, quantity, unit_price, created_at FROM order_item WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

pub async fn find_status(pool: &SqlitePool, id: i64) -> PosResult<Option<OrderStatus>> {
    let status = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(status)
}

/// Compare-and-swap status update: succeeds only while the stored status
/// still matches `from`. Returns the affected-row count; 0 means a
/// concurrent writer moved the order first (or the id is gone).
pub async fn cas_update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> PosResult<u64> {
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now_millis())
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

#[derive(sqlx::FromRow)]
struct TicketHeaderRow {
    id: i64,
    table_number: i64,
    status: OrderStatus,
    created_at: i64,
}

#[derive(sqlx::FromRow)]
struct TicketLineRow {
    order_id: i64,
    name: String,
    quantity: i64,
}

/// Active kitchen queue: PLACED and PREPARING orders, oldest first, with
/// their line summaries.
pub async fn find_kitchen_queue(pool: &SqlitePool) -> PosResult<Vec<KitchenTicket>> {
    let headers = sqlx::query_as::<_, TicketHeaderRow>(
        "SELECT o.id, t.number AS table_number, o.status, o.created_at \
         FROM orders o JOIN dining_table t ON t.id = o.table_id \
         WHERE o.status IN ('PLACED', 'PREPARING') \
         ORDER BY o.created_at, o.id",
    )
    .fetch_all(pool)
    .await?;

    let line_rows = sqlx::query_as::<_, TicketLineRow>(
        "SELECT i.order_id, m.name, i.quantity \
         FROM order_item i \
         JOIN menu_item m ON m.id = i.menu_item_id \
         JOIN orders o ON o.id = i.order_id \
         WHERE o.status IN ('PLACED', 'PREPARING') \
         ORDER BY i.id",
    )
    .fetch_all(pool)
    .await?;

    let mut tickets: Vec<KitchenTicket> = headers
        .into_iter()
        .map(|h| KitchenTicket {
            order_id: h.id,
            table_number: h.table_number,
            status: h.status,
            created_at: h.created_at,
            lines: Vec::new(),
        })
        .collect();

    let index: HashMap<i64, usize> = tickets
        .iter()
        .enumerate()
        .map(|(i, t)| (t.order_id, i))
        .collect();
    for row in line_rows {
        if let Some(&i) = index.get(&row.order_id) {
            tickets[i].lines.push(TicketLine {
                name: row.name,
                quantity: row.quantity,
            });
        }
    }
    Ok(tickets)
}
