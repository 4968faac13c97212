//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Sellable dish. Owned by the menu-management collaborator; the engine
/// only reads it and snapshots `price` into order lines at submission.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Unit price in integer currency units
    pub price: i64,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
