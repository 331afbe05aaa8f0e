use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, Envelope};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (store reachable)", body = Envelope),
        (status = 503, description = "Service is unhealthy (store unreachable)", body = Envelope)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    state.store.ping().await.map_err(ApiError::Unavailable)?;
    Ok(Json(Envelope::new(StatusCode::OK, "OK")))
}
