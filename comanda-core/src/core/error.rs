//! Unified error handling
//!
//! Every engine operation returns [`PosError`] as a typed result; nothing
//! is swallowed or logged away on the hot path. Classification matters to
//! callers:
//!
//! | Variant | Meaning | Retry? |
//! |---------|---------|--------|
//! | `NotFound` | identifier did not resolve | no - caller data problem |
//! | `InvalidTransition` | status lifecycle rule violated | no |
//! | `Conflict` | a concurrent writer won the race | no - re-read first |
//! | `NoTableAvailable` | allocator exhausted candidates | no |
//! | `SubmissionFailed` | atomic order batch failed, nothing persisted | no |
//! | `Validation` | caller input rejected before any write | no |
//! | `StoreUnavailable` | SQLite/pool failure | yes - transient |

use thiserror::Error;

/// Engine error types
#[derive(Debug, Error)]
pub enum PosError {
    /// A table, order, or reservation identifier did not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested status move is not an edge of the lifecycle state machine
    /// (skip, backward move, repeat, or out of a terminal state).
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A concurrent writer claimed the row first; the caller's view is stale.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No table satisfies the requested party size right now.
    #[error("No table available: {0}")]
    NoTableAvailable(String),

    /// The atomic order write batch failed and was rolled back; the cart
    /// is untouched and the operator may retry.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Caller input rejected before any store access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store-level I/O failure. The only variant worth an automatic retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<sqlx::Error> for PosError {
    fn from(err: sqlx::Error) -> Self {
        PosError::StoreUnavailable(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for PosError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        PosError::StoreUnavailable(err.to_string())
    }
}

/// Result type for engine operations
pub type PosResult<T> = Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_classification_prefix() {
        let err = PosError::NotFound("Table 42 not found".into());
        assert_eq!(err.to_string(), "Not found: Table 42 not found");

        let err = PosError::NoTableAvailable("no free table seats 6".into());
        assert!(err.to_string().starts_with("No table available:"));
    }

    #[test]
    fn sqlx_errors_map_to_store_unavailable() {
        let err: PosError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, PosError::StoreUnavailable(_)));
    }
}
