//! Reservation Repository

use sqlx::SqlitePool;

use crate::core::PosResult;
use crate::db::models::{Reservation, ReservationStatus};
use crate::util::now_millis;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PosResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(
        "SELECT id, customer_id, table_id, reserved_for, party_size, status, created_at, updated_at FROM reservation WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(reservation)
}

/// Guarded status update: only PENDING/CONFIRMED reservations may move.
/// Returns the affected-row count; 0 means unknown id or terminal state
/// (caller re-reads to classify).
pub async fn set_status_if_active(
    pool: &SqlitePool,
    id: i64,
    to: ReservationStatus,
) -> PosResult<u64> {
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?, updated_at = ? WHERE id = ? AND status IN ('PENDING', 'CONFIRMED')",
    )
    .bind(to)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
