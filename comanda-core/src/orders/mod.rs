//! Order workflow: submission and status lifecycle
//!
//! [`OrderService`] is the single entry point. `submit` turns a session
//! cart into a durable order plus line items inside one transaction
//! (`submit.rs`); `advance` moves a persisted order along the status
//! state machine with a compare-and-swap update (`status.rs`).

mod status;
mod submit;

pub use submit::OrderService;
