use crate::storage::CarStore;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CarStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }
}

/// Uniform body for every reply that does not carry cars.
///
/// `status` always equals the HTTP status of the response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Envelope {
    pub status: u16,
    pub text: String,
}

impl Envelope {
    pub fn new(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            text: text.into(),
        }
    }
}
