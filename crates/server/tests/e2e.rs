use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use migration::MigratorTrait;
use reqwest::{redirect::Policy, StatusCode as HttpStatusCode};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use configs::{AppConfig, DashboardConfig, DatabaseConfig};
use models::{customer, invoice};
use server::{routes, startup, state::AppState};

struct TestApp {
    base_url: String,
    db: Arc<DatabaseConnection>,
}

async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Ok(None);
    }

    let db = Arc::new(models::db::connect_with_config(&DatabaseConfig::from_env()).await?);
    if let Err(e) = migration::Migrator::up(db.as_ref(), None).await { eprintln!("migrations notice: {}", e); }

    let state = AppState::new(Arc::clone(&db), &DashboardConfig::default());
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(Some(TestApp { base_url, db }))
}

fn client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().redirect(Policy::none()).build()?)
}

#[tokio::test]
async fn serve_returns_once_shutdown_resolves() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() { return Ok(()); }

    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig::from_env();
    cfg.server.port = 0;
    cfg.dashboard.run_migrations = false;

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(startup::serve(cfg, async move { rx.await.ok(); }));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());

    tx.send(()).ok();
    let served = tokio::time::timeout(Duration::from_secs(5), handle).await??;
    assert!(served.is_ok());
    Ok(())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = client()?.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_invoice_create_edit_and_search() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = client()?;

    let tag = Uuid::new_v4().simple().to_string();
    let cust = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("E2E Customer {tag}")),
        email: Set(format!("{tag}@example.com")),
        image_url: Set("/customers/e2e.png".into()),
    }
    .insert(app.db.as_ref())
    .await?;

    // Create
    let res = c
        .post(format!("{}/dashboard/invoices", app.base_url))
        .form(&[("customerId", cust.id.to_string().as_str()), ("amount", "42.10"), ("status", "pending")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/dashboard/invoices");

    // Search by the unique email
    let res = c
        .get(format!("{}/dashboard/invoices", app.base_url))
        .query(&[("query", tag.as_str()), ("page", "1")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let rows = res.json::<Vec<Value>>().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["amount"], 4210);
    let id = rows[0]["id"].as_str().unwrap_or_default().to_string();

    let res = c
        .get(format!("{}/dashboard/invoices/pages", app.base_url))
        .query(&[("query", tag.as_str())])
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?["total_pages"], 1);

    // Edit
    let res = c
        .post(format!("{}/dashboard/invoices/{}", app.base_url, id))
        .form(&[("customerId", cust.id.to_string().as_str()), ("amount", "50"), ("status", "paid")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);

    let res = c.get(format!("{}/dashboard/invoices/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let form = res.json::<Value>().await?;
    assert_eq!(form["amount"], 50.0);
    assert_eq!(form["status"], "paid");

    // Listing reflects the edit
    let res = c
        .get(format!("{}/dashboard/invoices", app.base_url))
        .query(&[("query", tag.as_str())])
        .send()
        .await?;
    let rows = res.json::<Vec<Value>>().await?;
    assert_eq!(rows[0]["status"], "paid");

    // Customer table
    let res = c
        .get(format!("{}/dashboard/customers/table", app.base_url))
        .query(&[("query", tag.to_uppercase().as_str())])
        .send()
        .await?;
    let table = res.json::<Vec<Value>>().await?;
    assert_eq!(table.len(), 1);
    assert_eq!(table[0]["total_invoices"], 1);
    assert_eq!(table[0]["total_paid"], "$50.00");

    invoice::Entity::delete_by_id(Uuid::parse_str(&id)?).exec(app.db.as_ref()).await?;
    customer::Entity::delete_by_id(cust.id).exec(app.db.as_ref()).await?;
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_form_reports_fields() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = client()?
        .post(format!("{}/dashboard/invoices", app.base_url))
        .form(&[("amount", "abc")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["fields"]["customerId"].is_array());
    assert!(body["fields"]["status"].is_array());
    Ok(())
}

#[tokio::test]
async fn e2e_dashboard_reads() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = client()?;
    for path in ["/dashboard/revenue", "/dashboard/latest-invoices", "/dashboard/cards"] {
        let res = c.get(format!("{}{}", app.base_url, path)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK, "{path}");
        assert_eq!(res.headers()["cache-control"], "no-store", "{path}");
    }
    Ok(())
}
