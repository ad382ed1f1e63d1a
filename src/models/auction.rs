//! Auction domain types and the status state machine
//!
//! Status progresses: active → completed (terminal, at most once)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Condition of the product being auctioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl std::fmt::Display for ProductCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCondition::New => write!(f, "new"),
            ProductCondition::Used => write!(f, "used"),
            ProductCondition::Refurbished => write!(f, "refurbished"),
        }
    }
}

impl std::str::FromStr for ProductCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(ProductCondition::New),
            "used" => Ok(ProductCondition::Used),
            "refurbished" => Ok(ProductCondition::Refurbished),
            _ => Err(format!("Unknown product condition: {}", s)),
        }
    }
}

/// Auction status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    /// Accepting bids until the closure deadline
    Active,
    /// Closed, terminal
    Completed,
}

/// Rejected status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("auction is already completed")]
    AlreadyCompleted,
}

impl AuctionStatus {
    /// The closure transition. `Completed` has no outgoing transitions.
    pub fn complete(self) -> Result<AuctionStatus, TransitionError> {
        match self {
            AuctionStatus::Active => Ok(AuctionStatus::Completed),
            AuctionStatus::Completed => Err(TransitionError::AlreadyCompleted),
        }
    }

    pub fn is_active(self) -> bool {
        self == AuctionStatus::Active
    }
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuctionStatus::Active => write!(f, "active"),
            AuctionStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AuctionStatus::Active),
            "completed" => Ok(AuctionStatus::Completed),
            _ => Err(format!("Unknown auction status: {}", s)),
        }
    }
}

/// An auction record.
///
/// Any copy held outside the store is a snapshot: `status` may change in
/// the store as soon as the closure deadline passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    pub created_at: DateTime<Utc>,
    /// Closure deadline, set when the closure is armed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<DateTime<Utc>>,
}

impl Auction {
    /// Build a fresh `Active` auction with a new id.
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            created_at: Utc::now(),
            closes_at: None,
        }
    }
}

/// Request body for POST /auction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuctionRequest {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

impl CreateAuctionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_name.trim().is_empty() {
            return Err("product_name cannot be empty".to_string());
        }

        if self.category.trim().len() < 2 {
            return Err(format!(
                "category must be at least 2 characters, got: '{}'",
                self.category
            ));
        }

        if self.description.trim().len() < 10 {
            return Err("description must be at least 10 characters".to_string());
        }

        Ok(())
    }

    pub fn into_auction(self) -> Auction {
        Auction::new(
            self.product_name,
            self.category,
            self.description,
            self.condition,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
