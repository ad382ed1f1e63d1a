//! In-process `AuctionStore`
//!
//! Emulates the document store's atomic conditional update with a mutex and
//! applies `AuctionStatus::complete` under it. Failures can be injected to
//! exercise the error paths of the lifecycle scheduler.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::models::auction::Auction;
use crate::services::auction_store::{AuctionStore, StorageError};

#[derive(Debug, Default)]
pub struct InMemoryAuctionStore {
    auctions: Mutex<HashMap<String, Auction>>,
    fail_inserts: AtomicBool,
    fail_updates: AtomicBool,
    close_attempts: AtomicUsize,
}

impl InMemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail with `StorageError::Unavailable`
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `close_if_active` fail with `StorageError::Unavailable`
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of `close_if_active` calls received, failed ones included
    pub fn close_attempts(&self) -> usize {
        self.close_attempts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.auctions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.lock().is_empty()
    }
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StorageError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("insert rejected".to_string()));
        }

        let mut auctions = self.auctions.lock();
        if auctions.contains_key(&auction.id) {
            return Err(StorageError::Duplicate(auction.id.clone()));
        }
        auctions.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn close_if_active(&self, id: &str) -> Result<bool, StorageError> {
        self.close_attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("update rejected".to_string()));
        }

        let mut auctions = self.auctions.lock();
        let Some(auction) = auctions.get_mut(id) else {
            return Ok(false);
        };

        match auction.status.complete() {
            Ok(next) => {
                auction.status = next;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, StorageError> {
        Ok(self.auctions.lock().get(id).cloned())
    }

    async fn find_active(&self) -> Result<Vec<Auction>, StorageError> {
        let mut active: Vec<Auction> = self
            .auctions
            .lock()
            .values()
            .filter(|a| a.status.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|a| a.closes_at);
        Ok(active)
    }
}
