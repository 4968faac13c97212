//! Inventory Model

use serde::{Deserialize, Serialize};

/// Low-stock projection row: an inventory record at or below its restock
/// threshold, joined to the menu item for a display name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LowStockItem {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub restock_threshold: i64,
}
