use std::fmt::Display;

use thiserror::Error;
use tracing::error;

use crate::forms::FieldErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid form: {0}")]
    InvalidForm(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Log the underlying failure and replace it with a fixed, caller-facing message.
pub(crate) fn db_failure<E: Display>(message: &'static str) -> impl FnOnce(E) -> ServiceError {
    move |e| {
        error!(error = %e, "Database Error: {message}");
        ServiceError::Db(message.to_string())
    }
}

/// Same as [`db_failure`] for model-layer writes, keeping not-found
/// distinguishable.
pub(crate) fn write_failure(message: &'static str) -> impl FnOnce(models::errors::ModelError) -> ServiceError {
    use models::errors::ModelError;
    move |e| match e {
        ModelError::NotFound(what) => ServiceError::NotFound(what),
        other => db_failure(message)(other),
    }
}
