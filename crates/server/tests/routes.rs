use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use configs::DashboardConfig;
use models::{invoice::{self, InvoiceStatus}, revenue};
use server::{routes::build_router, state::AppState};

fn app(db: &Arc<DatabaseConnection>) -> Router {
    build_router(AppState::new(Arc::clone(db), &DashboardConfig::default()), CorsLayer::very_permissive())
}

fn empty_db() -> Arc<DatabaseConnection> {
    Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

fn db_with(results: Vec<Vec<invoice::Model>>) -> Arc<DatabaseConnection> {
    Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(results)
            .into_connection(),
    )
}

/// Statements the mock saw. Every router holding the connection must be dropped first.
fn statements(db: Arc<DatabaseConnection>) -> usize {
    match Arc::try_unwrap(db) {
        Ok(db) => db.into_transaction_log().len(),
        Err(_) => panic!("connection still shared by a router"),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn stored_invoice() -> invoice::Model {
    invoice::Model {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        amount: 1250,
        status: InvoiceStatus::Pending,
        date: Utc::now().into(),
    }
}

#[tokio::test]
async fn health_is_ok() {
    let res = app(&empty_db()).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let res = app(&empty_db()).oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc = json_body(res).await;
    assert!(doc["paths"]["/dashboard/invoices"].is_object());
}

#[tokio::test]
async fn invalid_form_is_rejected_before_any_query() {
    let db = empty_db();
    let res = app(&db)
        .oneshot(post_form("/dashboard/invoices", "amount=abc&status=paid"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Missing Fields");
    assert!(body["fields"]["customerId"].is_array());
    assert!(body["fields"]["amount"].is_array());
    assert!(body["fields"]["status"].is_null());
    assert_eq!(statements(db), 0);
}

#[tokio::test]
async fn create_redirects_and_refreshes_listing() {
    let db = db_with(vec![vec![], vec![stored_invoice()], vec![]]);
    let app = app(&db);

    let res = app.clone().oneshot(get("/dashboard/invoices?query=&page=1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let form = format!("customerId={}&amount=12.50&status=pending", Uuid::new_v4());
    let res = app.clone().oneshot(post_form("/dashboard/invoices", &form)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/dashboard/invoices");

    // Cached listing was dropped, so this reads the database again
    let res = app.oneshot(get("/dashboard/invoices?query=&page=1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(statements(db), 3);
}

#[tokio::test]
async fn listing_is_served_from_cache() {
    let db = db_with(vec![vec![]]);
    let app = app(&db);

    for _ in 0..2 {
        let res = app.clone().oneshot(get("/dashboard/invoices?query=lee&page=2")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, json!([]));
    }
    drop(app);
    assert_eq!(statements(db), 1);
}

#[tokio::test]
async fn unknown_invoice_is_not_found() {
    let db = db_with(vec![vec![]]);
    let uri = format!("/dashboard/invoices/{}", Uuid::new_v4());
    let res = app(&db).oneshot(get(&uri)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invoice_is_loaded_for_editing() {
    let stored = stored_invoice();
    let db = db_with(vec![vec![stored.clone()]]);
    let uri = format!("/dashboard/invoices/{}", stored.id);
    let res = app(&db).oneshot(get(&uri)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["amount"], json!(12.5));
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn update_of_missing_invoice_is_not_found() {
    let db = db_with(vec![vec![]]);
    let uri = format!("/dashboard/invoices/{}", Uuid::new_v4());
    let form = format!("customerId={}&amount=3&status=paid", Uuid::new_v4());
    let res = app(&db).oneshot(post_form(&uri, &form)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn revenue_is_never_cached() {
    let rows = vec![revenue::Model { month: "Jan".into(), revenue: 2000 }];
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection(),
    );
    let res = app(&db).oneshot(get("/dashboard/revenue")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CACHE_CONTROL], "no-store");
    assert_eq!(json_body(res).await, json!([{"month": "Jan", "revenue": 2000}]));
}

#[tokio::test]
async fn database_failure_is_generic() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("password authentication failed".into())])
            .into_connection(),
    );
    let res = app(&db).oneshot(get("/dashboard/customers")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["detail"], "Failed to fetch all customers.");
    assert!(!body.to_string().contains("password"));
}
