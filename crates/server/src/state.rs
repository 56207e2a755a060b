use std::{sync::Arc, time::Duration};

use configs::DashboardConfig;
use sea_orm::DatabaseConnection;

use crate::view_cache::ViewCache;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub views: Arc<ViewCache>,
    pub revenue_delay: Duration,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, cfg: &DashboardConfig) -> Self {
        Self {
            db,
            views: Arc::new(ViewCache::new(
                cfg.view_cache_capacity,
                Duration::from_secs(cfg.view_cache_ttl_secs),
            )),
            revenue_delay: Duration::from_millis(cfg.revenue_delay_ms),
        }
    }
}
