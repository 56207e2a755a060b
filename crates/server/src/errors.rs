use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::{errors::ServiceError, forms::FieldErrors};
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": ..., "detail": ..., "fields": {...}}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
    pub fields: Option<FieldErrors>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail, fields: None }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.error });
        if let Some(detail) = self.detail {
            body["detail"] = json!(detail);
        }
        if let Some(fields) = self.fields {
            body["fields"] = json!(fields);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidForm(fields) => Self {
                status: StatusCode::BAD_REQUEST,
                error: "Missing Fields",
                detail: Some(fields.to_string()),
                fields: Some(fields),
            },
            ServiceError::NotFound(what) => Self::not_found(what),
            // already logged with the underlying cause by the service layer
            ServiceError::Db(message) => Self::internal(message),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl IntoResponse for StartupError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let msg = self.to_string();
        error!(error = %msg, "startup error");
        (status, Json(json!({"error": msg}))).into_response()
    }
}
