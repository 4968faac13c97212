//! Table and reservation allocation
//!
//! [`TableAllocator`] is the single gate on table claims. A table is
//! claimed while an order on it is in `{PLACED, PREPARING, READY}` or a
//! `CONFIRMED` reservation holds it. The availability check and the
//! subsequent claim are serialized by a global mutex (table counts are
//! small), with a conditional insert re-checking the claim at the store
//! as a backstop: two concurrent requests for the last qualifying table
//! can never both succeed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::core::{PosError, PosResult};
use crate::db::models::{DiningTable, Reservation, ReservationStatus};
use crate::db::{DbService, repository};
use crate::util::{now_millis, snowflake_id};

const AVAILABLE_PREDICATE: &str = "capacity >= ?1 \
     AND id NOT IN (SELECT table_id FROM orders WHERE status IN ('PLACED', 'PREPARING', 'READY')) \
     AND id NOT IN (SELECT table_id FROM reservation WHERE status = 'CONFIRMED')";

/// Table availability and reservation service.
#[derive(Clone)]
pub struct TableAllocator {
    db: DbService,
    /// Serializes find-available against claim across all tables.
    claim: Arc<Mutex<()>>,
}

impl TableAllocator {
    pub fn new(db: DbService) -> Self {
        Self {
            db,
            claim: Arc::new(Mutex::new(())),
        }
    }

    /// Best-fit lookup: the unclaimed table with the smallest capacity
    /// that still seats the party, ties broken by ascending table number.
    pub async fn find_available_table(&self, party_size: i64) -> PosResult<DiningTable> {
        let table = sqlx::query_as::<_, DiningTable>(&format!(
            "SELECT id, number, capacity, kind, created_at FROM dining_table \
             WHERE {AVAILABLE_PREDICATE} ORDER BY capacity, number LIMIT 1"
        ))
        .bind(party_size)
        .fetch_optional(&self.db.pool)
        .await?;
        table.ok_or_else(|| {
            PosError::NoTableAvailable(format!("No free table seats a party of {party_size}"))
        })
    }

    /// Every unclaimed table that seats the party, best fit first.
    pub async fn list_available_tables(&self, party_size: i64) -> PosResult<Vec<DiningTable>> {
        let tables = sqlx::query_as::<_, DiningTable>(&format!(
            "SELECT id, number, capacity, kind, created_at FROM dining_table \
             WHERE {AVAILABLE_PREDICATE} ORDER BY capacity, number"
        ))
        .bind(party_size)
        .fetch_all(&self.db.pool)
        .await?;
        Ok(tables)
    }

    /// Reserve a table for a party: find a best-fit table, then write the
    /// customer (reused when name and phone already match a row) and a
    /// CONFIRMED reservation in one transaction. A failed claim leaves no
    /// orphan customer behind.
    pub async fn create_reservation(
        &self,
        customer_name: &str,
        phone: Option<&str>,
        party_size: i64,
        when_utc: DateTime<Utc>,
    ) -> PosResult<i64> {
        if customer_name.trim().is_empty() {
            return Err(PosError::Validation("Customer name is required".into()));
        }
        if party_size <= 0 {
            return Err(PosError::Validation(format!(
                "Party size must be positive, got {party_size}"
            )));
        }

        let _guard = self.claim.lock().await;

        let table = self.find_available_table(party_size).await?;
        let now = now_millis();
        let reservation_id = snowflake_id();

        let mut tx = self.db.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM customer WHERE name = ?1 AND (phone = ?2 OR (phone IS NULL AND ?2 IS NULL)) LIMIT 1",
        )
        .bind(customer_name)
        .bind(phone)
        .fetch_optional(&mut *tx)
        .await?;

        let customer_id = match existing {
            Some(id) => id,
            None => {
                let id = snowflake_id();
                sqlx::query("INSERT INTO customer (id, name, phone, created_at) VALUES (?, ?, ?, ?)")
                    .bind(id)
                    .bind(customer_name)
                    .bind(phone)
                    .bind(now)
                    .execute(&mut *tx)
                    .await?;
                id
            }
        };

        // Store-level re-check of the claim: inserts zero rows if the
        // table was taken between the availability read and here.
        let rows = sqlx::query(
            "INSERT INTO reservation (id, customer_id, table_id, reserved_for, party_size, status, created_at, updated_at) \
             SELECT ?1, ?2, ?3, ?4, ?5, 'CONFIRMED', ?6, ?6 \
             WHERE NOT EXISTS (SELECT 1 FROM reservation WHERE table_id = ?3 AND status = 'CONFIRMED') \
               AND NOT EXISTS (SELECT 1 FROM orders WHERE table_id = ?3 AND status IN ('PLACED', 'PREPARING', 'READY'))",
        )
        .bind(reservation_id)
        .bind(customer_id)
        .bind(table.id)
        .bind(when_utc.timestamp_millis())
        .bind(party_size)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if rows.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(PosError::Conflict(format!(
                "Table {} was claimed concurrently",
                table.number
            )));
        }

        tx.commit().await?;
        Ok(reservation_id)
    }

    /// Seat the party: `PENDING`/`CONFIRMED` -> `COMPLETED`.
    pub async fn seat(&self, reservation_id: i64) -> PosResult<()> {
        self.finish(reservation_id, ReservationStatus::Completed)
            .await
    }

    /// Release the claim: `PENDING`/`CONFIRMED` -> `CANCELLED`.
    pub async fn cancel(&self, reservation_id: i64) -> PosResult<()> {
        self.finish(reservation_id, ReservationStatus::Cancelled)
            .await
    }

    async fn finish(&self, reservation_id: i64, to: ReservationStatus) -> PosResult<()> {
        let rows =
            repository::reservation::set_status_if_active(&self.db.pool, reservation_id, to)
                .await?;
        if rows > 0 {
            return Ok(());
        }
        // Zero rows: unknown id or already terminal. Re-read to classify.
        match repository::reservation::find_by_id(&self.db.pool, reservation_id).await? {
            None => Err(PosError::NotFound(format!(
                "Reservation {reservation_id} not found"
            ))),
            Some(r) => Err(PosError::InvalidTransition(format!(
                "Reservation {reservation_id} is already {:?}",
                r.status
            ))),
        }
    }

    pub async fn find_reservation(&self, reservation_id: i64) -> PosResult<Reservation> {
        repository::reservation::find_by_id(&self.db.pool, reservation_id)
            .await?
            .ok_or_else(|| PosError::NotFound(format!("Reservation {reservation_id} not found")))
    }
}
