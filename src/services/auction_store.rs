//! Auction persistence
//!
//! The conditional update in `close_if_active` is the only way an auction
//! is ever closed. Concurrent or repeated closers are safe because the
//! database applies the `id = ? AND status = 'active'` filter atomically.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use thiserror::Error;

use crate::entities::{auctions, prelude::*};
use crate::models::auction::{Auction, AuctionStatus};

/// Errors raised by an auction store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("auction {0} already exists")]
    Duplicate(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt auction record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Durable key-document storage for auctions
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// Persist a new auction. Fails on duplicate id or unreachable storage.
    async fn insert(&self, auction: &Auction) -> Result<(), StorageError>;

    /// Set `status = completed` on the record matching `id` and
    /// `status = active`.
    ///
    /// Returns `true` if this call closed the auction and `false` if nothing
    /// matched (already completed, or unknown id).
    async fn close_if_active(&self, id: &str) -> Result<bool, StorageError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, StorageError>;

    /// All auctions still `Active`, earliest deadline first
    async fn find_active(&self) -> Result<Vec<Auction>, StorageError>;
}

/// `AuctionStore` backed by the `auctions` table
#[derive(Clone)]
pub struct SeaOrmAuctionStore {
    db: DatabaseConnection,
}

impl SeaOrmAuctionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuctionStore for SeaOrmAuctionStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StorageError> {
        let model = auctions::ActiveModel {
            id: Set(auction.id.clone()),
            product_name: Set(auction.product_name.clone()),
            category: Set(auction.category.clone()),
            description: Set(auction.description.clone()),
            condition: Set(auction.condition.to_string()),
            status: Set(auction.status.to_string()),
            created_at: Set(auction.created_at.fixed_offset()),
            closes_at: Set(auction.closes_at.map(|t| t.fixed_offset())),
        };

        Auctions::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    StorageError::Duplicate(auction.id.clone())
                }
                _ => StorageError::Database(e),
            })?;

        tracing::debug!(auction_id = %auction.id, "Inserted auction");
        Ok(())
    }

    async fn close_if_active(&self, id: &str) -> Result<bool, StorageError> {
        // Database-side form of AuctionStatus::complete
        let result = Auctions::update_many()
            .col_expr(
                auctions::Column::Status,
                Expr::value(AuctionStatus::Completed.to_string()),
            )
            .filter(auctions::Column::Id.eq(id))
            .filter(auctions::Column::Status.eq(AuctionStatus::Active.to_string()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, StorageError> {
        Auctions::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(Auction::try_from)
            .transpose()
    }

    async fn find_active(&self) -> Result<Vec<Auction>, StorageError> {
        Auctions::find()
            .filter(auctions::Column::Status.eq(AuctionStatus::Active.to_string()))
            .order_by_asc(auctions::Column::ClosesAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Auction::try_from)
            .collect()
    }
}

impl TryFrom<auctions::Model> for Auction {
    type Error = StorageError;

    fn try_from(model: auctions::Model) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StorageError::Corrupt {
            id: model.id.clone(),
            reason,
        };

        let condition = model.condition.parse().map_err(corrupt)?;
        let status = model.status.parse().map_err(corrupt)?;

        Ok(Auction {
            condition,
            status,
            created_at: model.created_at.with_timezone(&Utc),
            closes_at: model.closes_at.map(|t| t.with_timezone(&Utc)),
            id: model.id,
            product_name: model.product_name,
            category: model.category,
            description: model.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(condition: &str, status: &str) -> auctions::Model {
        auctions::Model {
            id: "a-1".to_string(),
            product_name: "Laptop".to_string(),
            category: "Electronics".to_string(),
            description: "Barely used laptop".to_string(),
            condition: condition.to_string(),
            status: status.to_string(),
            created_at: Utc::now().fixed_offset(),
            closes_at: None,
        }
    }

    #[test]
    fn test_model_into_auction() {
        let auction = Auction::try_from(model("used", "completed")).unwrap();
        assert_eq!(auction.id, "a-1");
        assert_eq!(auction.status, AuctionStatus::Completed);
        assert!(auction.closes_at.is_none());
    }

    #[test]
    fn test_unknown_status_is_corrupt() {
        let err = Auction::try_from(model("used", "paused")).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref id, .. } if id == "a-1"));
    }
}
