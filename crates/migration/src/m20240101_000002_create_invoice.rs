//! Create `invoice` table with FK to `customer`.
//!
//! `amount` holds minor currency units (cents); `status` is `pending` or `paid`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(uuid(Invoice::Id).primary_key())
                    .col(uuid(Invoice::CustomerId).not_null())
                    .col(big_integer(Invoice::Amount).not_null())
                    .col(string_len(Invoice::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Invoice::Date).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_customer")
                            .from(Invoice::Table, Invoice::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .check(Expr::col(Invoice::Status).is_in(["pending", "paid"]))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Invoice::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Invoice { Table, Id, CustomerId, Amount, Status, Date }

#[derive(DeriveIden)]
enum Customer { Table, Id }
