use crate::domain::{Car, CarPatch, CarReplacement, NewCar};
use crate::transport::http::handlers::{cars, health};
use crate::transport::http::types::{AppState, Envelope};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        cars::list_cars_handler,
        cars::get_car_handler,
        cars::create_car_handler,
        cars::patch_car_handler,
        cars::replace_cars_handler,
        cars::delete_car_handler
    ),
    components(schemas(Car, NewCar, CarPatch, CarReplacement, Envelope))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/cars",
            get(cars::list_cars_handler)
                .post(cars::create_car_handler)
                .put(cars::replace_cars_handler),
        )
        .route(
            "/cars/:id",
            get(cars::get_car_handler)
                .patch(cars::patch_car_handler)
                .delete(cars::delete_car_handler),
        )
        .with_state(app_state)
}
