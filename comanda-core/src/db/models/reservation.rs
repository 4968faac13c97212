//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
///
/// The allocator only ever creates `Confirmed` rows; `Pending` remains a
/// legal non-terminal state for externally created reservations.
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        )
    }
}

/// A claim on a table for a party at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub table_id: i64,
    /// Requested date/time, UTC epoch milliseconds
    pub reserved_for: i64,
    pub party_size: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
