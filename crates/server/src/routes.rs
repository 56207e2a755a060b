use axum::{
    http::{header, HeaderValue},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{openapi::ApiDoc, state::AppState};

pub mod customers;
pub mod dashboard;
pub mod invoices;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, dashboard reads, invoice
/// mutations, customers and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Live figures are never cached by clients or intermediaries
    let live = Router::new()
        .route("/dashboard/revenue", get(dashboard::revenue))
        .route("/dashboard/latest-invoices", get(dashboard::latest_invoices))
        .route("/dashboard/cards", get(dashboard::cards))
        .route_layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let invoices = Router::new()
        .route("/dashboard/invoices", get(invoices::list).post(invoices::create))
        .route("/dashboard/invoices/pages", get(invoices::pages))
        .route("/dashboard/invoices/:id", get(invoices::get).post(invoices::update));

    let customers = Router::new()
        .route("/dashboard/customers", get(customers::list))
        .route("/dashboard/customers/table", get(customers::table));

    Router::new()
        .route("/health", get(health))
        .merge(live)
        .merge(invoices)
        .merge(customers)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
