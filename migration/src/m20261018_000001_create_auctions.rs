//! Migration to create the auctions table
//!
//! `closes_at` holds the armed closure deadline so pending closures can be
//! re-armed after a restart.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Auctions::Table)
                    .if_not_exists()
                    .col(string_len(Auctions::Id, 36).primary_key())
                    .col(string(Auctions::ProductName))
                    .col(string(Auctions::Category))
                    .col(text(Auctions::Description))
                    .col(string_len(Auctions::Condition, 16))
                    .col(string_len(Auctions::Status, 16).default("active"))
                    .col(timestamp_with_time_zone(Auctions::CreatedAt))
                    .col(timestamp_with_time_zone_null(Auctions::ClosesAt))
                    .to_owned(),
            )
            .await?;

        // Recovery sweep scans active auctions on startup
        manager
            .create_index(
                Index::create()
                    .name("idx_auctions_status")
                    .table(Auctions::Table)
                    .col(Auctions::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Auctions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Auctions {
    Table,
    Id,
    ProductName,
    Category,
    Description,
    Condition,
    Status,
    CreatedAt,
    ClosesAt,
}
