//! `SeaORM` Entity for auctions table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "auctions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_name: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// "new" | "used" | "refurbished"
    pub condition: String,
    /// "active" | "completed"
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    /// Armed closure deadline
    pub closes_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
