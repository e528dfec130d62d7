//! Migration: Create errors table.
//!
//! One row per API error code. `info` is response-only and has no column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Errors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Errors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Errors::ApiCode)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Errors::Code).integer().not_null())
                    .col(ColumnDef::new(Errors::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Errors::Description).text().not_null())
                    .col(
                        ColumnDef::new(Errors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Errors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Errors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Errors {
    Table,
    Id,
    ApiCode,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
