//! Migration to create the `budget` table.
//!
//! `author_id` is optional and detaches (`SET NULL`) when its author is
//! deleted; budget rows are never cascade-deleted.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_author::Author;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Budget::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budget::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Budget::Year).integer().not_null())
                    .col(ColumnDef::new(Budget::Month).integer().not_null())
                    .col(ColumnDef::new(Budget::Amount).integer().not_null())
                    .col(ColumnDef::new(Budget::Type).string_len(100).not_null())
                    .col(ColumnDef::new(Budget::AuthorId).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_author")
                            .from(Budget::Table, Budget::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Stats queries filter by year
        manager
            .create_index(
                Index::create()
                    .name("idx_budget_year")
                    .table(Budget::Table)
                    .col(Budget::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_budget_author")
                    .table(Budget::Table)
                    .col(Budget::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Budget::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Budget {
    Table,
    Id,
    Year,
    Month,
    Amount,
    Type,
    AuthorId,
}
