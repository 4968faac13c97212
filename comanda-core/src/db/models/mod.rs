//! Row and entity types backing the engine
//!
//! Structs derive `sqlx::FromRow` for `query_as` reads; status enums derive
//! `sqlx::Type` and are stored as SCREAMING_SNAKE_CASE text.

pub mod dining_table;
pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod reservation;

pub use dining_table::DiningTable;
pub use inventory::LowStockItem;
pub use menu_item::MenuItem;
pub use order::{KitchenTicket, Order, OrderLine, OrderStatus, TicketLine};
pub use reservation::{Reservation, ReservationStatus};
