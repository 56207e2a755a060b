use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Invoice: FK lookups and latest-first listing
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_customer")
                    .table(Invoice::Table)
                    .col(Invoice::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_date")
                    .table(Invoice::Table)
                    .col(Invoice::Date)
                    .to_owned(),
            )
            .await?;

        // Card totals filter by status
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_status")
                    .table(Invoice::Table)
                    .col(Invoice::Status)
                    .to_owned(),
            )
            .await?;

        // Customer table is sorted by name
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_name")
                    .table(Customer::Table)
                    .col(Customer::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_invoice_customer").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_date").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_status").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_name").table(Customer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Invoice { Table, CustomerId, Date, Status }

#[derive(DeriveIden)]
enum Customer { Table, Name }
