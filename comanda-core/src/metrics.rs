//! Dashboard metrics
//!
//! Read-only rollups for the manager dashboard. Each figure is one
//! independent query — point-in-time snapshots, not transactionally
//! consistent with each other.

use crate::core::PosResult;
use crate::db::DbService;
use crate::db::models::LowStockItem;

/// Read-only dashboard aggregator.
#[derive(Clone)]
pub struct Dashboard {
    db: DbService,
}

impl Dashboard {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// Orders not yet served and not cancelled.
    pub async fn active_order_count(&self) -> PosResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE status IN ('PLACED', 'PREPARING', 'READY')",
        )
        .fetch_one(&self.db.pool)
        .await?;
        Ok(count)
    }

    /// Sum of order totals, cancelled orders excluded. 0 with no orders.
    pub async fn total_sales(&self) -> PosResult<i64> {
        let sum: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total), 0) FROM orders WHERE status <> 'CANCELLED'",
        )
        .fetch_one(&self.db.pool)
        .await?;
        Ok(sum)
    }

    /// Mean total of non-cancelled orders; 0.0 when there are none.
    pub async fn average_order_value(&self) -> PosResult<f64> {
        let (sum, count): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0), COUNT(*) FROM orders WHERE status <> 'CANCELLED'",
        )
        .fetch_one(&self.db.pool)
        .await?;
        if count == 0 {
            return Ok(0.0);
        }
        Ok(sum as f64 / count as f64)
    }

    /// Inventory rows at or below their restock threshold.
    pub async fn low_stock_count(&self) -> PosResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventory WHERE quantity <= restock_threshold",
        )
        .fetch_one(&self.db.pool)
        .await?;
        Ok(count)
    }

    /// The low-stock rows themselves, emptiest first.
    pub async fn low_stock_items(&self) -> PosResult<Vec<LowStockItem>> {
        let items = sqlx::query_as::<_, LowStockItem>(
            "SELECT i.menu_item_id, m.name, i.quantity, i.restock_threshold \
             FROM inventory i JOIN menu_item m ON m.id = i.menu_item_id \
             WHERE i.quantity <= i.restock_threshold \
             ORDER BY i.quantity, m.name",
        )
        .fetch_all(&self.db.pool)
        .await?;
        Ok(items)
    }
}
