use sea_orm::{
    sea_query::{Expr, LikeExpr},
    Condition, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, SelectTwo,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::{customer, invoice};
use crate::{
    errors::{db_failure, write_failure, ServiceError},
    forms::InvoiceFormInput,
    pagination::{total_pages, Pagination, ITEMS_PER_PAGE},
    records::{InvoiceForm, InvoiceRow, LatestInvoice},
    revalidate::{PathRevalidator, INVOICES_PATH},
};

const LATEST_INVOICES: u64 = 5;

/// Validate the form, insert the invoice, then mark the listing stale.
#[instrument(skip_all)]
pub async fn create_invoice(
    db: &DatabaseConnection,
    revalidator: &dyn PathRevalidator,
    form: &InvoiceFormInput,
) -> Result<invoice::Model, ServiceError> {
    let input = form.validate()?;
    let created = invoice::create(db, input.customer_id, input.amount, input.status)
        .await
        .map_err(write_failure("Failed to create invoice."))?;
    info!(id = %created.id, customer_id = %created.customer_id, amount = created.amount, status = %created.status, "invoice created");
    revalidator.revalidate_path(INVOICES_PATH);
    Ok(created)
}

/// Validate the form and overwrite customer, amount and status of `id`.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_invoice(
    db: &DatabaseConnection,
    revalidator: &dyn PathRevalidator,
    id: Uuid,
    form: &InvoiceFormInput,
) -> Result<invoice::Model, ServiceError> {
    let input = form.validate()?;
    let updated = invoice::update(db, id, input.customer_id, input.amount, input.status)
        .await
        .map_err(write_failure("Failed to update invoice."))?;
    info!(id = %updated.id, amount = updated.amount, status = %updated.status, "invoice updated");
    revalidator.revalidate_path(INVOICES_PATH);
    Ok(updated)
}

/// Five most recent invoices with their customer.
pub async fn fetch_latest_invoices(db: &DatabaseConnection) -> Result<Vec<LatestInvoice>, ServiceError> {
    let rows = latest_invoices_query()
        .all(db)
        .await
        .map_err(db_failure("Failed to fetch the latest invoices."))?;
    Ok(with_customer(rows).map(|(i, c)| LatestInvoice::from_rows(i, c)).collect())
}

/// One page of invoices whose customer name, customer email or status
/// contains `query`.
pub async fn fetch_filtered_invoices(
    db: &DatabaseConnection,
    query: &str,
    page: u32,
) -> Result<Vec<InvoiceRow>, ServiceError> {
    let rows = filtered_invoices_query(query, page)
        .all(db)
        .await
        .map_err(db_failure("Failed to fetch invoices."))?;
    Ok(with_customer(rows).map(|(i, c)| InvoiceRow::from_rows(i, c)).collect())
}

/// Number of listing pages for `query`, using the same predicate as
/// [`fetch_filtered_invoices`].
pub async fn fetch_invoices_pages(db: &DatabaseConnection, query: &str) -> Result<u64, ServiceError> {
    let count = matching_invoices(query)
        .count(db)
        .await
        .map_err(db_failure("Failed to fetch total number of invoices."))?;
    Ok(total_pages(count, ITEMS_PER_PAGE))
}

/// Load an invoice for editing. `Ok(None)` means no such invoice.
pub async fn fetch_invoice_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<InvoiceForm>, ServiceError> {
    let found = invoice::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_failure("Failed to fetch invoice."))?;
    Ok(found.map(InvoiceForm::from))
}

fn latest_invoices_query() -> SelectTwo<invoice::Entity, customer::Entity> {
    invoice::Entity::find()
        .find_also_related(customer::Entity)
        .order_by_desc(invoice::Column::Date)
        .limit(LATEST_INVOICES)
}

fn filtered_invoices_query(query: &str, page: u32) -> SelectTwo<invoice::Entity, customer::Entity> {
    let opts = Pagination::invoices(page);
    let (_, per_page) = opts.normalize();
    matching_invoices(query)
        .select_also(customer::Entity)
        .order_by_desc(invoice::Column::Date)
        .order_by_asc(invoice::Column::Id)
        .limit(per_page)
        .offset(opts.offset())
}

pub(crate) fn matching_invoices(query: &str) -> Select<invoice::Entity> {
    invoice::Entity::find()
        .join(JoinType::InnerJoin, invoice::Relation::Customer.def())
        .filter(search_condition(query))
}

fn search_condition(query: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(query));
    let like = || LikeExpr::new(pattern.clone()).escape('\\');
    Condition::any()
        .add(Expr::col((customer::Entity, customer::Column::Name)).like(like()))
        .add(Expr::col((customer::Entity, customer::Column::Email)).like(like()))
        .add(Expr::col((invoice::Entity, invoice::Column::Status)).like(like()))
}

/// Escape LIKE wildcards so user input matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn with_customer(
    rows: Vec<(invoice::Model, Option<customer::Model>)>,
) -> impl Iterator<Item = (invoice::Model, customer::Model)> {
    rows.into_iter().filter_map(|(inv, cust)| match cust {
        Some(c) => Some((inv, c)),
        None => {
            warn!(id = %inv.id, customer_id = %inv.customer_id, "invoice without customer skipped");
            None
        }
    })
}
