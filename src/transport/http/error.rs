//! HTTP-facing errors and their envelope rendering.

use crate::storage::StoreError;
use crate::transport::http::types::Envelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Everything a car handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Bad request: Wrong ID")]
    WrongId,

    /// The body did not bind to the expected shape. Carries the reply text.
    #[error("Bad request: {message}")]
    InvalidBody {
        message: &'static str,
        detail: String,
    },

    /// A store call failed while performing `action`.
    #[error("{}", store_text(.source, .action))]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },

    /// A bulk replace stopped at a failing record; earlier records stay applied.
    #[error("{} (applied {applied} of {total} records)", store_text(.source, .action))]
    PartialBatch {
        action: &'static str,
        applied: usize,
        total: usize,
        #[source]
        source: StoreError,
    },

    #[error("Service unavailable: Store unreachable")]
    Unavailable(#[source] StoreError),
}

fn store_text(source: &StoreError, action: &str) -> String {
    match source {
        StoreError::NotFound(_) => "Not found: Car not found".to_string(),
        StoreError::Rejected(_) => format!("Bad request: Could not {}", action),
        StoreError::Backend(_) => format!("Internal server error: Could not {}", action),
    }
}

fn store_status(source: &StoreError) -> StatusCode {
    match source {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Rejected(_) => StatusCode::BAD_REQUEST,
        StoreError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { action, source }
    }

    pub fn invalid_body(message: &'static str, detail: impl ToString) -> ApiError {
        ApiError::InvalidBody {
            message,
            detail: detail.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::WrongId | ApiError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store { source, .. } | ApiError::PartialBatch { source, .. } => {
                store_status(source)
            }
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let text = self.to_string();
        match &self {
            ApiError::InvalidBody { detail, .. } => {
                tracing::warn!(status = status.as_u16(), %detail, "{}", text);
            }
            ApiError::Store { source, .. }
            | ApiError::PartialBatch { source, .. }
            | ApiError::Unavailable(source) => {
                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), error = %source, "{}", text);
                } else {
                    tracing::warn!(status = status.as_u16(), error = %source, "{}", text);
                }
            }
            ApiError::WrongId => {
                tracing::warn!(status = status.as_u16(), "{}", text);
            }
        }
        (status, Json(Envelope::new(status, text))).into_response()
    }
}
