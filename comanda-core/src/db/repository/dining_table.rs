//! Dining Table Repository

use sqlx::SqlitePool;

use crate::core::PosResult;
use crate::db::models::DiningTable;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PosResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, number, capacity, kind, created_at FROM dining_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &SqlitePool, number: i64) -> PosResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, number, capacity, kind, created_at FROM dining_table WHERE number = ?",
    )
    .bind(number)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}
