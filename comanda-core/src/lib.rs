//! Comanda Core - order & table lifecycle engine for a single-device
//! restaurant point of sale
//!
//! The engine covers the part of the POS with real invariants: building
//! a pending order in memory, committing it atomically, walking it
//! through the status state machine, and allocating tables without
//! double-booking. Presentation, authentication, and ad-hoc reporting
//! are external collaborators.
//!
//! # Module structure
//!
//! ```text
//! comanda-core/src/
//! ├── core/        # configuration, error types
//! ├── util.rs      # timestamps, snowflake ids
//! ├── db/          # SQLite pool, migrations, models, repositories
//! ├── cart.rs      # in-memory session cart
//! ├── orders/      # submission workflow + status state machine
//! ├── tables.rs    # table/reservation allocator
//! ├── metrics.rs   # dashboard rollups
//! └── kitchen.rs   # periodic kitchen display feed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use comanda_core::{Cart, DbService, OrderService};
//!
//! # async fn demo() -> comanda_core::PosResult<()> {
//! let db = DbService::open("comanda.db").await?;
//! let orders = OrderService::new(db);
//!
//! let mut cart = Cart::new();
//! cart.add(42, "Paella", 1450);
//! let order_id = orders.submit(&mut cart, 7, 1001, None).await?;
//! # let _ = order_id;
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod core;
pub mod db;
pub mod kitchen;
pub mod metrics;
pub mod orders;
pub mod tables;
pub mod util;

// Re-export the public surface
pub use cart::{Cart, CartLine, CartTotals, TAX_RATE};
pub use core::{Config, PosError, PosResult};
pub use db::models::{
    DiningTable, KitchenTicket, LowStockItem, MenuItem, Order, OrderLine, OrderStatus,
    Reservation, ReservationStatus, TicketLine,
};
pub use db::{DbService, WALK_IN_CUSTOMER_ID};
pub use kitchen::KitchenFeed;
pub use metrics::Dashboard;
pub use orders::OrderService;
pub use tables::TableAllocator;
