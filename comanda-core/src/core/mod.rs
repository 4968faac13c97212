//! Core module - engine configuration and error definitions
//!
//! # Module structure
//!
//! - [`Config`] - engine configuration
//! - [`PosError`] / [`PosResult`] - typed errors returned by every operation

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{PosError, PosResult};
