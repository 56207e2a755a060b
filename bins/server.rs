use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging() {
    // .env first so RUST_LOG and LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
}

fn install_panic_hook(instance_id: Uuid) {
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "dashboard", event = "panic", %instance_id, message = %info, "unhandled panic occurred");
    }));
}

/// Worker count from `server.worker_threads`, or `TOKIO_WORKER_THREADS`
/// when the config cannot be loaded.
fn worker_threads() -> Option<usize> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "config unavailable for runtime sizing");
            std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok())
        }
    }
}

fn build_runtime(workers: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("dashboard-worker");
    if let Some(w) = workers { builder.worker_threads(w); }
    builder.build()
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "ctrl_c", "shutdown requested"),
        _ = terminate => info!(signal = "terminate", "shutdown requested"),
    }
}

fn main() -> ExitCode {
    init_logging();

    let instance_id = Uuid::new_v4();
    install_panic_hook(instance_id);

    let workers = worker_threads();
    let rt = match build_runtime(workers) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        %instance_id,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = workers.unwrap_or_default(),
        "dashboard server starting"
    );

    match rt.block_on(server::run(shutdown_signal())) {
        Ok(()) => {
            info!(%instance_id, "dashboard server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(%instance_id, error = %format!("{e:#}"), "dashboard server failed");
            ExitCode::FAILURE
        }
    }
}
