//! Cache invalidation boundary.
//!
//! Mutations signal that rendered views under a path are stale; the web layer
//! owns the cache and decides what that means.

/// Listing view refreshed after every invoice mutation.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub trait PathRevalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

/// Revalidator for contexts without a render cache (CLI tools, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRevalidator;

impl PathRevalidator for NoopRevalidator {
    fn revalidate_path(&self, _path: &str) {}
}
