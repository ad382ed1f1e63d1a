mod common;

use std::sync::Arc;
use std::time::Duration;

use auction_lifecycle::{
    config::LifecycleConfig,
    models::auction::AuctionStatus,
    services::{
        auction_store::{AuctionStore, SeaOrmAuctionStore, StorageError},
        lifecycle::LifecycleScheduler,
    },
};
use tokio::task::JoinSet;

use crate::common::{sample_auction, setup_test_db};

async fn store() -> SeaOrmAuctionStore {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    SeaOrmAuctionStore::new(db)
}

#[tokio::test]
async fn test_insert_and_find() {
    let store = store().await;
    let auction = sample_auction();

    store.insert(&auction).await.unwrap();

    let stored = store.find_by_id(&auction.id).await.unwrap().unwrap();
    assert_eq!(stored.id, auction.id);
    assert_eq!(stored.product_name, auction.product_name);
    assert_eq!(stored.condition, auction.condition);
    assert_eq!(stored.status, AuctionStatus::Active);
    assert_eq!(stored.created_at.timestamp(), auction.created_at.timestamp());
}

#[tokio::test]
async fn test_find_unknown_returns_none() {
    let store = store().await;
    assert!(store.find_by_id("does-not-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_insert_fails() {
    let store = store().await;
    let auction = sample_auction();

    store.insert(&auction).await.unwrap();
    let err = store.insert(&auction).await.unwrap_err();
    assert!(
        matches!(err, StorageError::Duplicate(_) | StorageError::Database(_)),
        "got {err:?}"
    );

    let active = store.find_active().await.unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_close_if_active_is_idempotent() {
    let store = store().await;
    let auction = sample_auction();
    store.insert(&auction).await.unwrap();

    assert!(store.close_if_active(&auction.id).await.unwrap());
    assert!(!store.close_if_active(&auction.id).await.unwrap());

    let stored = store.find_by_id(&auction.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AuctionStatus::Completed);
}

#[tokio::test]
async fn test_close_unknown_id_matches_nothing() {
    let store = store().await;
    assert!(!store.close_if_active("does-not-exist").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_closers_close_once() {
    let store = store().await;
    let auction = sample_auction();
    store.insert(&auction).await.unwrap();

    let mut closers = JoinSet::new();
    for _ in 0..8 {
        let store = store.clone();
        let id = auction.id.clone();
        closers.spawn(async move { store.close_if_active(&id).await.unwrap() });
    }

    let results = closers.join_all().await;
    assert_eq!(results.iter().filter(|closed| **closed).count(), 1);
    assert_eq!(results.len(), 8);
}

#[tokio::test]
async fn test_find_active_excludes_completed() {
    let store = store().await;
    let open = sample_auction();
    let closed = sample_auction();
    store.insert(&open).await.unwrap();
    store.insert(&closed).await.unwrap();
    store.close_if_active(&closed.id).await.unwrap();

    let active = store.find_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, open.id);
}

/// End to end against the database with a short real-time interval
#[tokio::test]
async fn test_auction_closes_automatically() {
    let store = Arc::new(store().await);
    let scheduler = LifecycleScheduler::new(
        store.clone(),
        LifecycleConfig::new(Duration::from_millis(200)),
    );

    let created = scheduler.create_and_schedule(sample_auction()).await.unwrap();

    let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AuctionStatus::Active);
    assert!(stored.closes_at.is_some());

    tokio::time::sleep(Duration::from_millis(800)).await;

    let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AuctionStatus::Completed);
}
