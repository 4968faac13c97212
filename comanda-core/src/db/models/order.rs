//! Order Models

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Forward progression with one side-exit:
///
/// ```text
/// PLACED -> PREPARING -> READY -> SERVED
///    \          \
///     `----------`--> CANCELLED
/// ```
///
/// `Served` and `Cancelled` are terminal. Stored as SCREAMING_SNAKE_CASE
/// text; the migration's CHECK constraint enumerates the same five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    /// The complete set of legal next states from this one.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Placed => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Served],
            OrderStatus::Served | OrderStatus::Cancelled => &[],
        }
    }

    /// Whether `next` is a legal edge from this state. Same-state
    /// re-requests, skips, and backward moves are all illegal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

/// Persisted order header
///
/// `customer_id` is never null; orders without a customer on file carry
/// the walk-in placeholder. `total` is tax-inclusive integer currency.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub table_id: i64,
    pub staff_id: i64,
    pub status: OrderStatus,
    pub total: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One dish-quantity-price snapshot belonging to an order. Write-once:
/// `unit_price` is captured from the cart at submission and never re-read
/// from the menu.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub created_at: i64,
}

/// Kitchen display projection of an active order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenTicket {
    pub order_id: i64,
    pub table_number: i64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub lines: Vec<TicketLine>,
}

/// Display name and count of one ticket line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketLine {
    pub name: String,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_edges_are_legal() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Served));
    }

    #[test]
    fn cancel_is_reachable_from_placed_and_preparing_only() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Served.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn skips_repeats_and_backward_moves_are_illegal() {
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Placed));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(OrderStatus::Served.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Placed.is_terminal());
    }

    #[test]
    fn status_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
    }
}
