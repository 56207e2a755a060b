//! Service layer for the invoicing dashboard.
//! - Validates submitted forms before any persistence call.
//! - Wraps single ORM calls and reshapes rows into presentation records.
//! - Hides persistence error details behind fixed messages (logged via `tracing`).

pub mod errors;
pub mod forms;
pub mod pagination;
pub mod records;
pub mod revalidate;
pub mod db;
#[cfg(test)]
pub mod test_support;
