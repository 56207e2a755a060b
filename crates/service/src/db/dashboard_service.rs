use std::time::Duration;

use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use tracing::{debug, info};

use models::{customer, invoice::{self, InvoiceStatus}, revenue};
use crate::{errors::{db_failure, ServiceError}, records::CardData};

/// All revenue rows. `delay` simulates a slow backend; zero skips it.
pub async fn fetch_revenue(db: &DatabaseConnection, delay: Duration) -> Result<Vec<revenue::Model>, ServiceError> {
    if !delay.is_zero() {
        info!(delay_ms = delay.as_millis() as u64, "Fetching revenue data...");
        tokio::time::sleep(delay).await;
    }
    let rows = revenue::Entity::find()
        .all(db)
        .await
        .map_err(db_failure("Failed to fetch revenue data."))?;
    debug!(count = rows.len(), "revenue rows loaded");
    Ok(rows)
}

/// Customer and invoice counts plus paid/pending totals. The four queries are
/// independent and run concurrently.
pub async fn fetch_card_data(db: &DatabaseConnection) -> Result<CardData, ServiceError> {
    let (customers, invoices, paid, pending) = tokio::try_join!(
        customer::Entity::find().count(db),
        invoice::Entity::find().count(db),
        sum_by_status(db, InvoiceStatus::Paid),
        sum_by_status(db, InvoiceStatus::Pending),
    )
    .map_err(db_failure("Failed to fetch card data."))?;
    Ok(CardData::from_totals(customers, invoices, paid, pending))
}

/// `COALESCE(SUM(amount), 0)::BIGINT` over invoices with `status`.
async fn sum_by_status(db: &DatabaseConnection, status: InvoiceStatus) -> Result<i64, DbErr> {
    let total = invoice::Entity::find()
        .select_only()
        .column_as(sum_as_bigint(Expr::col(invoice::Column::Amount).into()), "total")
        .filter(invoice::Column::Status.eq(status))
        .into_tuple::<i64>()
        .one(db)
        .await?;
    Ok(total.unwrap_or(0))
}

/// Postgres widens `SUM(bigint)` to `numeric`; cast back so it decodes as `i64`.
pub(crate) fn sum_as_bigint(expr: SimpleExpr) -> SimpleExpr {
    let summed: SimpleExpr = Func::coalesce([Func::sum(expr).into(), Expr::val(0i64).into()]).into();
    Func::cast_as(summed, Alias::new("BIGINT")).into()
}
