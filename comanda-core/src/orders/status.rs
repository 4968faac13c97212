//! Order status transitions
//!
//! The legal edges live on [`OrderStatus`] itself; this module applies
//! them to persisted orders. The update is compare-and-swapped on the
//! status read beforehand, so two concurrent `advance` calls can never
//! both succeed against the same order.

use crate::core::{PosError, PosResult};
use crate::db::models::OrderStatus;
use crate::db::repository;
use crate::orders::OrderService;

impl OrderService {
    /// Move an order to `requested`, which must be a direct edge of the
    /// state machine from the order's current status.
    ///
    /// Re-requesting a transition that already happened is rejected with
    /// `InvalidTransition` rather than accepted as a no-op — double
    /// submissions in calling code are bugs worth surfacing. A lost race
    /// against a concurrent writer reports `Conflict`.
    pub async fn advance(&self, order_id: i64, requested: OrderStatus) -> PosResult<OrderStatus> {
        let current = repository::order::find_status(self.pool(), order_id)
            .await?
            .ok_or_else(|| PosError::NotFound(format!("Order {order_id} not found")))?;

        if !current.can_transition_to(requested) {
            return Err(PosError::InvalidTransition(format!(
                "Order {order_id}: {current:?} -> {requested:?} is not a legal move"
            )));
        }

        self.apply_transition(order_id, current, requested).await
    }

    /// Compare-and-swap apply: succeeds only while the stored status
    /// still matches `from`. Zero affected rows means a concurrent
    /// writer moved the order between the caller's read and here.
    pub(crate) async fn apply_transition(
        &self,
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> PosResult<OrderStatus> {
        let rows = repository::order::cas_update_status(self.pool(), order_id, from, to).await?;
        if rows == 0 {
            return Err(PosError::Conflict(format!(
                "Order {order_id} was moved by a concurrent writer"
            )));
        }
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn seed_placed_order(db: &DbService) -> i64 {
        sqlx::query(
            "INSERT INTO dining_table (id, number, capacity, kind, created_at) \
             VALUES (1, 1, 4, 'STANDARD', 0)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO employee (id, name, role, created_at) VALUES (1001, 'Server', 'SERVER', 0)")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO orders (id, customer_id, table_id, staff_id, status, total, created_at, updated_at) \
             VALUES (501, 1, 1, 1001, 'PLACED', 2700, 0, 0)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
        501
    }

    #[tokio::test]
    async fn stale_cas_is_classified_as_conflict() {
        let db = DbService::open_in_memory().await.unwrap();
        let order_id = seed_placed_order(&db).await;
        let service = OrderService::new(db.clone());

        // A concurrent writer moves the order first.
        repository::order::cas_update_status(
            &db.pool,
            order_id,
            OrderStatus::Placed,
            OrderStatus::Preparing,
        )
        .await
        .unwrap();

        // Applying against the stale PLACED view must lose, not cancel.
        let err = service
            .apply_transition(order_id, OrderStatus::Placed, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Conflict(_)));

        let status = repository::order::find_status(&db.pool, order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn fresh_cas_applies_and_reports_the_new_status() {
        let db = DbService::open_in_memory().await.unwrap();
        let order_id = seed_placed_order(&db).await;
        let service = OrderService::new(db.clone());

        let status = service
            .apply_transition(order_id, OrderStatus::Placed, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Preparing);
    }
}
