use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;
use service::{
    db::invoice_service,
    errors::ServiceError,
    forms::InvoiceFormInput,
    records::InvoiceForm,
    revalidate::INVOICES_PATH,
};
use tracing::info;
use uuid::Uuid;

use common::types::PageCount;
use crate::{errors::JsonApiError, state::AppState, view_cache::ViewKey};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Substring matched against customer name, email and status.
    #[serde(default)]
    pub query: String,
    /// 1-based page; missing or non-numeric values mean the first page.
    #[serde(default)]
    pub page: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct PagesQuery {
    #[serde(default)]
    pub query: String,
}

#[utoipa::path(
    get, path = "/dashboard/invoices", tag = "invoices",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of matching invoices", body = [crate::openapi::InvoiceRowDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Value>, JsonApiError> {
    let page = q.page();
    let key = ViewKey::new(INVOICES_PATH, format!("list?query={}&page={page}", q.query));
    let (db, query) = (state.db.as_ref(), q.query.as_str());
    let body = state
        .views
        .get_or_render(key, move || invoice_service::fetch_filtered_invoices(db, query, page))
        .await?;
    Ok(Json(Value::clone(&body)))
}

#[utoipa::path(
    get, path = "/dashboard/invoices/pages", tag = "invoices",
    params(PagesQuery),
    responses(
        (status = 200, description = "Number of listing pages", body = crate::openapi::PageCountDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn pages(State(state): State<AppState>, Query(q): Query<PagesQuery>) -> Result<Json<Value>, JsonApiError> {
    let key = ViewKey::new(INVOICES_PATH, format!("pages?query={}", q.query));
    let (db, query) = (state.db.as_ref(), q.query.as_str());
    let body = state
        .views
        .get_or_render(key, move || async move {
            let total_pages = invoice_service::fetch_invoices_pages(db, query).await?;
            Ok::<_, ServiceError>(PageCount { total_pages })
        })
        .await?;
    Ok(Json(Value::clone(&body)))
}

#[utoipa::path(
    post, path = "/dashboard/invoices", tag = "invoices",
    request_body(content = crate::openapi::InvoiceFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the listing"),
        (status = 400, description = "Missing Fields"),
        (status = 500, description = "Database Error")
    )
)]
pub async fn create(State(state): State<AppState>, Form(form): Form<InvoiceFormInput>) -> Result<Redirect, JsonApiError> {
    let created = invoice_service::create_invoice(&state.db, state.views.as_ref(), &form).await?;
    info!(id = %created.id, "create invoice request completed");
    Ok(Redirect::to(INVOICES_PATH))
}

#[utoipa::path(
    get, path = "/dashboard/invoices/{id}", tag = "invoices",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice for the edit form", body = crate::openapi::InvoiceFormDoc),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Database Error")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<InvoiceForm>, JsonApiError> {
    match invoice_service::fetch_invoice_by_id(&state.db, id).await? {
        Some(invoice) => Ok(Json(invoice)),
        None => Err(JsonApiError::not_found(format!("invoice {id} not found"))),
    }
}

#[utoipa::path(
    post, path = "/dashboard/invoices/{id}", tag = "invoices",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    request_body(content = crate::openapi::InvoiceFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the listing"),
        (status = 400, description = "Missing Fields"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Database Error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<InvoiceFormInput>,
) -> Result<Redirect, JsonApiError> {
    invoice_service::update_invoice(&state.db, state.views.as_ref(), id, &form).await?;
    info!(%id, "update invoice request completed");
    Ok(Redirect::to(INVOICES_PATH))
}
