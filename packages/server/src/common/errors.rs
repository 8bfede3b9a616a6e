//! API error taxonomy.
//!
//! Every request handler and domain operation returns `Result<_, ApiError>`.
//! The variants map onto the HTTP statuses the API exposes: 401/403 for
//! auth failures, 404 for unknown rows, 422 for validation failures with
//! field-scoped messages, 500 for everything else (detail logged, not
//! leaked to the client).

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Field-scoped validation messages, accumulated across all checks so a
/// single response reports every failing field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Convert into an error if any message was recorded.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

/// Errors surfaced to API clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("This action is unauthorized")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("The given data was invalid")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        ApiError::Validation(errors)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures keep their detail in the logs only.
        let body = match self {
            ApiError::Validation(errors) => ErrorBody {
                message: "The given data was invalid.".to_string(),
                errors: Some(errors),
            },
            ApiError::Database(ref e) => {
                tracing::error!(error = %e, "Database error while handling request");
                ErrorBody {
                    message: "Internal server error.".to_string(),
                    errors: None,
                }
            }
            ApiError::Internal(ref e) => {
                tracing::error!(error = %e, "Internal error while handling request");
                ErrorBody {
                    message: "Internal server error.".to_string(),
                    errors: None,
                }
            }
            other => ErrorBody {
                message: format!("{}.", other),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
