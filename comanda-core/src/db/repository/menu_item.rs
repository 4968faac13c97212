//! Menu Item Repository
//!
//! Read-only: the menu is owned by the menu-management collaborator.

use sqlx::SqlitePool;

use crate::core::PosResult;
use crate::db::models::MenuItem;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PosResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, is_available, created_at, updated_at FROM menu_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Items currently orderable, in order-entry screen order.
pub async fn find_available(pool: &SqlitePool) -> PosResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, is_available, created_at, updated_at FROM menu_item WHERE is_available = 1 ORDER BY category, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}
