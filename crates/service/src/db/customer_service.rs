use sea_orm::{
    sea_query::{extension::postgres::PgExpr, Expr, LikeExpr, SimpleExpr},
    Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    QueryFilter, RelationTrait, Select,
};
use uuid::Uuid;

use common::currency::format_currency;
use models::{customer, invoice::{self, InvoiceStatus}};
use crate::{
    db::{dashboard_service::sum_as_bigint, invoice_service::escape_like},
    errors::{db_failure, ServiceError},
    records::CustomerTableRow,
};

/// All customers, unmodified.
pub async fn fetch_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>, ServiceError> {
    customer::Entity::find()
        .all(db)
        .await
        .map_err(db_failure("Failed to fetch all customers."))
}

#[derive(Debug, FromQueryResult)]
struct CustomerTotals {
    id: Uuid,
    name: String,
    email: String,
    image_url: String,
    total_invoices: i64,
    total_pending: i64,
    total_paid: i64,
}

impl From<CustomerTotals> for CustomerTableRow {
    fn from(t: CustomerTotals) -> Self {
        Self {
            id: t.id,
            name: t.name,
            email: t.email,
            image_url: t.image_url,
            total_invoices: t.total_invoices,
            total_pending: format_currency(t.total_pending),
            total_paid: format_currency(t.total_paid),
        }
    }
}

/// Customers whose name or email contains `query` (case-insensitive), with
/// invoice count and per-status totals, sorted by name.
pub async fn fetch_filtered_customers(
    db: &DatabaseConnection,
    query: &str,
) -> Result<Vec<CustomerTableRow>, ServiceError> {
    let rows = customers_table_query(query)
        .into_model::<CustomerTotals>()
        .all(db)
        .await
        .map_err(db_failure("Failed to fetch customer table."))?;
    Ok(rows.into_iter().map(CustomerTableRow::from).collect())
}

fn customers_table_query(query: &str) -> Select<customer::Entity> {
    let pattern = format!("%{}%", escape_like(query));
    let ilike = || LikeExpr::new(pattern.clone()).escape('\\');
    customer::Entity::find()
        .select_only()
        .column(customer::Column::Id)
        .column(customer::Column::Name)
        .column(customer::Column::Email)
        .column(customer::Column::ImageUrl)
        .column_as(Expr::col((invoice::Entity, invoice::Column::Id)).count(), "total_invoices")
        .column_as(status_total(InvoiceStatus::Pending), "total_pending")
        .column_as(status_total(InvoiceStatus::Paid), "total_paid")
        .join(JoinType::LeftJoin, customer::Relation::Invoice.def())
        .filter(
            Condition::any()
                .add(Expr::col((customer::Entity, customer::Column::Name)).ilike(ilike()))
                .add(Expr::col((customer::Entity, customer::Column::Email)).ilike(ilike())),
        )
        .group_by(customer::Column::Id)
        .group_by(customer::Column::Name)
        .group_by(customer::Column::Email)
        .group_by(customer::Column::ImageUrl)
        .order_by_asc(customer::Column::Name)
}

/// `SUM(CASE WHEN status = <status> THEN amount ELSE 0 END)`
fn status_total(status: InvoiceStatus) -> SimpleExpr {
    let amount_if_status: SimpleExpr = Expr::case(
        Expr::col((invoice::Entity, invoice::Column::Status)).eq(status.as_str()),
        Expr::col((invoice::Entity, invoice::Column::Amount)),
    )
    .finally(Expr::val(0i64))
    .into();
    sum_as_bigint(amount_if_status)
}
