//! Kitchen feed worker
//!
//! Re-polls the active order queue (PLACED/PREPARING, oldest first) on a
//! fixed interval and publishes snapshots on a watch channel for kitchen
//! displays. Read-only: poll failures are logged and the previous
//! snapshot stands; the loop stops only on cancellation.

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::db::models::KitchenTicket;
use crate::db::{DbService, repository};

/// Periodic kitchen display feed.
pub struct KitchenFeed {
    db: DbService,
    refresh: Duration,
    shutdown: CancellationToken,
    tx: watch::Sender<Vec<KitchenTicket>>,
}

impl KitchenFeed {
    pub fn new(db: DbService, refresh: Duration, shutdown: CancellationToken) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            db,
            refresh,
            shutdown,
            tx,
        }
    }

    /// Receiver for the latest snapshot. Starts empty until the first
    /// poll completes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<KitchenTicket>> {
        self.tx.subscribe()
    }

    /// Main loop: immediate initial poll, then one poll per interval
    /// until the token is cancelled.
    pub async fn run(self) {
        tracing::info!(
            refresh_secs = self.refresh.as_secs(),
            "Kitchen feed started"
        );
        self.poll().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.refresh) => {
                    self.poll().await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Kitchen feed received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn poll(&self) {
        match repository::order::find_kitchen_queue(&self.db.pool).await {
            Ok(tickets) => {
                tracing::debug!(tickets = tickets.len(), "Kitchen queue refreshed");
                self.tx.send_replace(tickets);
            }
            Err(e) => {
                // Keep the previous snapshot; the next tick retries.
                tracing::error!("Kitchen queue poll failed: {e}");
            }
        }
    }
}
