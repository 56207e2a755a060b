//! Create `revenue` table. Read-only monthly aggregate.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Revenue::Table)
                    .if_not_exists()
                    .col(string_len(Revenue::Month, 4).primary_key())
                    .col(integer(Revenue::Revenue).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Revenue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Revenue { Table, Month, Revenue }
