use axum::{extract::State, Json};
use service::{
    db::{dashboard_service, invoice_service},
    records::{CardData, LatestInvoice},
};
use tracing::info;

use models::revenue;
use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/dashboard/revenue", tag = "dashboard",
    responses(
        (status = 200, description = "Monthly revenue", body = [crate::openapi::RevenueDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn revenue(State(state): State<AppState>) -> Result<Json<Vec<revenue::Model>>, JsonApiError> {
    let rows = dashboard_service::fetch_revenue(&state.db, state.revenue_delay).await?;
    info!(count = rows.len(), "revenue fetched");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/dashboard/latest-invoices", tag = "dashboard",
    responses(
        (status = 200, description = "Five most recent invoices", body = [crate::openapi::LatestInvoiceDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn latest_invoices(State(state): State<AppState>) -> Result<Json<Vec<LatestInvoice>>, JsonApiError> {
    Ok(Json(invoice_service::fetch_latest_invoices(&state.db).await?))
}

#[utoipa::path(
    get, path = "/dashboard/cards", tag = "dashboard",
    responses(
        (status = 200, description = "Summary card figures", body = crate::openapi::CardDataDoc),
        (status = 500, description = "Database Error")
    )
)]
pub async fn cards(State(state): State<AppState>) -> Result<Json<CardData>, JsonApiError> {
    Ok(Json(dashboard_service::fetch_card_data(&state.db).await?))
}
