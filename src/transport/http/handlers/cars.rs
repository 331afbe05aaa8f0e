use crate::domain::{Car, CarPatch, CarReplacement, NewCar};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, Envelope};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

fn car_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(_) => Err(ApiError::WrongId),
    }
}

#[utoipa::path(
    get,
    path = "/cars",
    responses(
        (status = 200, description = "All cars, ordered by id", body = [Car]),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn list_cars_handler(State(state): State<AppState>) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = state
        .store
        .find_all()
        .await
        .map_err(ApiError::store("get the cars"))?;
    tracing::debug!(count = cars.len(), "listed cars");
    Ok(Json(cars))
}

#[utoipa::path(
    get,
    path = "/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "The car", body = Car),
        (status = 400, description = "Wrong ID", body = Envelope),
        (status = 404, description = "Car not found", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn get_car_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Car>, ApiError> {
    let id = car_id(id)?;
    let car = state
        .store
        .find_by_id(id)
        .await
        .map_err(ApiError::store("retrieve the car"))?;
    Ok(Json(car))
}

#[utoipa::path(
    post,
    path = "/cars",
    request_body = NewCar,
    responses(
        (status = 201, description = "Created", body = Envelope),
        (status = 400, description = "Wrong car message or rejected by store", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_car_handler(
    State(state): State<AppState>,
    request: Result<Json<NewCar>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_car) = request.map_err(|e| ApiError::invalid_body("Wrong car message", e))?;

    let car = state
        .store
        .insert(new_car)
        .await
        .map_err(ApiError::store("create the car message"))?;
    tracing::info!(id = car.id, "car created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/cars/{}", car.id))],
        Json(Envelope::new(StatusCode::CREATED, "Created")),
    ))
}

#[utoipa::path(
    patch,
    path = "/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    request_body = CarPatch,
    responses(
        (status = 200, description = "Updated", body = Envelope),
        (status = 400, description = "Wrong ID, invalid input or rejected by store", body = Envelope),
        (status = 404, description = "Car not found", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn patch_car_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<CarPatch>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let id = car_id(id)?;
    let Json(patch) = request.map_err(|e| ApiError::invalid_body("Invalid input", e))?;

    state
        .store
        .update_by_id(id, &patch)
        .await
        .map_err(ApiError::store("update the message"))?;
    tracing::info!(id, "car updated");

    Ok(Json(Envelope::new(StatusCode::OK, "Updated")))
}

/// Applies each replacement in order and stops at the first failure.
///
/// There is no transaction around the batch: replacements applied before the
/// failing one stay committed.
#[utoipa::path(
    put,
    path = "/cars",
    request_body = [CarReplacement],
    responses(
        (status = 200, description = "All replacements applied", body = Envelope),
        (status = 400, description = "Invalid input or a replacement was rejected", body = Envelope),
        (status = 404, description = "A replacement targets a missing car", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn replace_cars_handler(
    State(state): State<AppState>,
    request: Result<Json<Vec<CarReplacement>>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let Json(replacements) = request.map_err(|e| ApiError::invalid_body("Invalid input", e))?;
    let total = replacements.len();

    for (applied, item) in replacements.iter().enumerate() {
        if let Err(source) = state.store.update_by_id(item.id, &item.changes).await {
            tracing::warn!(id = item.id, applied, total, "bulk replace halted");
            return Err(ApiError::PartialBatch {
                action: "update the car message",
                applied,
                total,
                source,
            });
        }
    }
    tracing::info!(total, "bulk replace applied");

    Ok(Json(Envelope::new(StatusCode::OK, "OK")))
}

#[utoipa::path(
    delete,
    path = "/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Deleted", body = Envelope),
        (status = 400, description = "Wrong ID", body = Envelope),
        (status = 404, description = "Car not found", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn delete_car_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let id = car_id(id)?;
    state
        .store
        .delete_by_id(id)
        .await
        .map_err(ApiError::store("delete the message"))?;
    tracing::info!(id, "car deleted");

    Ok(Json(Envelope::new(StatusCode::OK, "Deleted")))
}
