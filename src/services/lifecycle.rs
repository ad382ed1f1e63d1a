//! Auction lifecycle scheduler
//!
//! Persists new auctions and arms one deferred closure per auction. Each
//! closure is an independent tokio task that sleeps for the configured
//! interval, measured from the moment it is armed, then makes a single
//! `close_if_active` attempt. Failures are logged and never retried.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::LifecycleConfig;
use crate::models::auction::Auction;
use crate::services::auction_store::{AuctionStore, StorageError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to persist auction: {0}")]
    Storage(#[from] StorageError),
}

/// Result of one closure attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureOutcome {
    /// This attempt moved the auction to `Completed`
    Closed,
    /// The auction was already completed or does not exist
    NotActive,
    /// The store update failed; the auction stays as it was
    Failed,
}

#[derive(Clone)]
pub struct LifecycleScheduler {
    store: Arc<dyn AuctionStore>,
    config: LifecycleConfig,
}

impl LifecycleScheduler {
    pub fn new(store: Arc<dyn AuctionStore>, config: LifecycleConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn AuctionStore> {
        &self.store
    }

    pub fn auction_interval(&self) -> Duration {
        self.config.auction_interval
    }

    /// Persist `auction` and arm its closure.
    ///
    /// Returns as soon as the insert succeeds; the closure runs later in the
    /// background. If the insert fails nothing is armed.
    pub async fn create_and_schedule(&self, mut auction: Auction) -> Result<Auction, LifecycleError> {
        let interval = self.config.auction_interval;
        auction.closes_at = chrono::Duration::from_std(interval)
            .ok()
            .and_then(|delta| Utc::now().checked_add_signed(delta));

        if let Err(e) = self.store.insert(&auction).await {
            error!(auction_id = %auction.id, error = %e, "Failed to insert auction");
            return Err(e.into());
        }

        info!(
            auction_id = %auction.id,
            product_name = %auction.product_name,
            interval_ms = interval.as_millis() as u64,
            "Auction created"
        );

        // Detached: nothing waits on the closure
        let _ = self.arm_closure(auction.id.clone(), interval);

        Ok(auction)
    }

    /// Spawn the one-shot closure task for `auction_id`, firing after `delay`.
    pub fn arm_closure(&self, auction_id: String, delay: Duration) -> JoinHandle<ClosureOutcome> {
        let store = Arc::clone(&self.store);

        debug!(
            auction_id = %auction_id,
            delay_ms = delay.as_millis() as u64,
            "Armed auction closure"
        );

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            close_auction(store.as_ref(), &auction_id).await
        })
    }
}

/// Make a single closure attempt and report the outcome.
pub async fn close_auction(store: &dyn AuctionStore, auction_id: &str) -> ClosureOutcome {
    match store.close_if_active(auction_id).await {
        Ok(true) => {
            info!(auction_id = %auction_id, "Auction closed automatically");
            ClosureOutcome::Closed
        }
        Ok(false) => {
            info!(auction_id = %auction_id, "Auction was not active or did not exist");
            ClosureOutcome::NotActive
        }
        Err(e) => {
            error!(auction_id = %auction_id, error = %e, "Failed to close auction");
            ClosureOutcome::Failed
        }
    }
}
