//! Repository Module
//!
//! Free async functions over `&SqlitePool`, one module per entity.
//! Reads use `query_as`/`query_scalar` with explicit column lists; guarded
//! updates report `rows_affected` and leave classification to the caller.
//! Multi-row writes that must land together run inside service-owned
//! transactions, not here.

// Reference data
pub mod dining_table;
pub mod menu_item;

// Lifecycle entities
pub mod order;
pub mod reservation;
