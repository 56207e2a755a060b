//! Rendered-view cache for the invoice listing.
//!
//! Entries are keyed by the page path plus a variant string (query and page).
//! Revalidating a path drops every variant stored under it and bumps the
//! path's generation, so a render that started before the revalidation is
//! never left behind in the cache.

use std::{future::Future, sync::Arc, time::Duration};

use dashmap::DashMap;
use moka::future::Cache;
use serde::Serialize;
use serde_json::Value;
use service::{errors::ServiceError, revalidate::PathRevalidator};
use tracing::{debug, warn};

use crate::errors::JsonApiError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub path: String,
    pub variant: String,
}

impl ViewKey {
    pub fn new(path: &str, variant: impl Into<String>) -> Self {
        Self { path: path.to_string(), variant: variant.into() }
    }
}

pub struct ViewCache {
    inner: Cache<ViewKey, Arc<Value>>,
    generations: DashMap<String, u64>,
}

impl ViewCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();
        Self { inner, generations: DashMap::new() }
    }

    /// Number of times `path` has been revalidated.
    pub fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).map(|g| *g).unwrap_or(0)
    }

    pub async fn get(&self, key: &ViewKey) -> Option<Arc<Value>> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: ViewKey, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        self.inner.insert(key, Arc::clone(&value)).await;
        value
    }

    /// Serve `key` from cache, or run `render` and store its JSON form.
    /// Failed renders are not cached.
    pub async fn get_or_render<T, F, Fut>(&self, key: ViewKey, render: F) -> Result<Arc<Value>, JsonApiError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        if let Some(hit) = self.get(&key).await {
            debug!(path = %key.path, variant = %key.variant, "view cache hit");
            return Ok(hit);
        }
        let started = self.generation(&key.path);
        let rendered = render().await?;
        let value = serde_json::to_value(&rendered).map_err(|e| {
            warn!(error = %e, "failed to serialize view");
            JsonApiError::internal("Failed to render view.")
        })?;
        if self.generation(&key.path) != started {
            debug!(path = %key.path, "view revalidated while rendering; not cached");
            return Ok(Arc::new(value));
        }
        let value = self.insert(key.clone(), value).await;
        // revalidate_path bumps the generation before it invalidates
        if self.generation(&key.path) != started {
            self.inner.invalidate(&key).await;
        }
        Ok(value)
    }
}

impl PathRevalidator for ViewCache {
    fn revalidate_path(&self, path: &str) {
        let path = path.to_string();
        *self.generations.entry(path.clone()).or_insert(0) += 1;
        debug!(%path, "revalidating cached views");
        if let Err(e) = self.inner.invalidate_entries_if(move |key, _| key.path == path) {
            warn!(error = %e, "view cache invalidation failed");
        }
    }
}
