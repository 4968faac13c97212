//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity. Static reference data: the engine reads it for
/// allocation but never creates or destroys tables.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: i64,
    /// Operator-facing table number, unique across the floor
    pub number: i64,
    pub capacity: i64,
    /// Type tag, e.g. STANDARD / BOOTH / OUTDOOR
    pub kind: String,
    pub created_at: i64,
}
