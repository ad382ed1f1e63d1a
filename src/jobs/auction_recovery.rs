//! Startup recovery for pending auction closures
//!
//! Closure tasks only live in process memory. On startup every auction still
//! `Active` is re-armed: overdue ones fire immediately, the rest wait for the
//! remainder of their persisted deadline. Auctions without a recorded
//! deadline get a full interval.

use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::services::auction_store::{AuctionStore, StorageError};
use crate::services::lifecycle::{ClosureOutcome, LifecycleScheduler};

/// Closures armed by a recovery sweep
#[derive(Debug, Default)]
pub struct RecoveredClosures {
    /// Deadline already passed, armed with no delay
    pub overdue: usize,
    /// Deadline in the future, armed with the remaining delay
    pub rearmed: usize,
    pub handles: Vec<JoinHandle<ClosureOutcome>>,
}

pub async fn recover_pending_closures(
    scheduler: &LifecycleScheduler,
) -> Result<RecoveredClosures, StorageError> {
    let active = scheduler.store().find_active().await?;
    let now = Utc::now();
    let mut recovered = RecoveredClosures::default();

    for auction in active {
        let delay = match auction.closes_at {
            // to_std fails for negative spans, i.e. the deadline has passed
            Some(closes_at) => (closes_at - now).to_std().unwrap_or(Duration::ZERO),
            None => scheduler.auction_interval(),
        };

        if delay.is_zero() {
            recovered.overdue += 1;
        } else {
            recovered.rearmed += 1;
        }
        recovered.handles.push(scheduler.arm_closure(auction.id, delay));
    }

    info!(
        overdue = recovered.overdue,
        rearmed = recovered.rearmed,
        "Recovered pending auction closures"
    );

    Ok(recovered)
}
