use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))?;
    serve(cfg, shutdown).await
}

/// Connect, optionally migrate, and serve. In-flight requests finish after
/// `shutdown` resolves.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.dashboard.run_migrations {
        info!("applying pending migrations");
        migration::Migrator::up(&db, None).await?;
    }
    if cfg.dashboard.revenue_delay_ms > 0 {
        warn!(delay_ms = cfg.dashboard.revenue_delay_ms, "revenue responses are artificially delayed");
    }

    let state = AppState::new(Arc::new(db), &cfg.dashboard);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting dashboard server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("dashboard server drained");
    Ok(())
}
