//! Database Module
//!
//! Handles the SQLite connection pool and embedded migrations.

pub mod models;
pub mod repository;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::core::{PosError, PosResult};

/// Seeded placeholder customer substituted for orders without a customer
/// on file. The migration inserts this row; it must never be deleted.
pub const WALK_IN_CUSTOMER_ID: i64 = 1;

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) a database file with WAL mode and apply
    /// migrations.
    pub async fn open(db_path: &str) -> PosResult<Self> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| PosError::StoreUnavailable(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| PosError::StoreUnavailable(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL)");
        Self::init(pool).await
    }

    /// In-memory database for tests. A single connection that never expires:
    /// SQLite drops an in-memory database with its last connection.
    pub async fn open_in_memory() -> PosResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| PosError::StoreUnavailable(format!("Invalid connect options: {e}")))?
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| PosError::StoreUnavailable(format!("Failed to open database: {e}")))?;

        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> PosResult<Self> {
        // busy_timeout: wait up to 5s on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| PosError::StoreUnavailable(format!("Failed to set busy_timeout: {e}")))?;

        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| PosError::StoreUnavailable(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_applies_schema_and_seed() {
        let db = DbService::open_in_memory().await.unwrap();

        // Schema is queryable and the walk-in placeholder is seeded.
        let walk_ins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer WHERE id = 1")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(walk_ins, 1);
    }

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.db");
        let db = DbService::open(path.to_str().unwrap()).await.unwrap();

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'orders'",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(tables, 1);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = DbService::open_in_memory().await.unwrap();

        // order_item without a parent order must be rejected.
        let result = sqlx::query(
            "INSERT INTO order_item (id, order_id, menu_item_id, quantity, unit_price, created_at) \
             VALUES (1, 999, 999, 1, 100, 0)",
        )
        .execute(&db.pool)
        .await;
        assert!(result.is_err());
    }
}
