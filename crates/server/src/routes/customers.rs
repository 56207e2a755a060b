use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use service::{db::customer_service, records::CustomerTableRow};

use models::customer;
use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct TableQuery {
    /// Case-insensitive substring of name or email.
    #[serde(default)]
    pub query: String,
}

#[utoipa::path(
    get, path = "/dashboard/customers", tag = "customers",
    responses(
        (status = 200, description = "All customers", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<customer::Model>>, JsonApiError> {
    Ok(Json(customer_service::fetch_customers(&state.db).await?))
}

#[utoipa::path(
    get, path = "/dashboard/customers/table", tag = "customers",
    params(TableQuery),
    responses(
        (status = 200, description = "Customers with invoice totals", body = [crate::openapi::CustomerTableRowDoc]),
        (status = 500, description = "Database Error")
    )
)]
pub async fn table(
    State(state): State<AppState>,
    Query(q): Query<TableQuery>,
) -> Result<Json<Vec<CustomerTableRow>>, JsonApiError> {
    Ok(Json(customer_service::fetch_filtered_customers(&state.db, &q.query).await?))
}
