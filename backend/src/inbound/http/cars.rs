//! Car API handlers.
//!
//! ```text
//! GET /api/v1/cars
//! POST /api/v1/cars {"brand":"Toyota","model":"Corolla","vin":"1HGCM82633A004352","year":2015}
//! DELETE /api/v1/cars/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Car, CarId, NewCar};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FormText, parse_path_id};

/// Body for `POST /api/v1/cars`. Numeric fields may be strings or numbers.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CarRequest {
    #[schema(value_type = String, example = "Toyota")]
    pub brand: FormText,
    #[schema(value_type = String, example = "Corolla")]
    pub model: FormText,
    #[schema(value_type = String, example = "1HGCM82633A004352")]
    pub vin: FormText,
    #[schema(value_type = String, example = "2015")]
    pub year: FormText,
}

/// A car as shown to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CarResponse {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub vin: String,
    pub year: i32,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id.get(),
            brand: car.brand.as_ref().to_owned(),
            model: car.model.as_ref().to_owned(),
            vin: car.vin.as_ref().to_owned(),
            year: car.year.get(),
        }
    }
}

/// Register a car for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Car registered", body = CarResponse),
        (status = 400, description = "Invalid car", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "addCar"
)]
#[post("/cars")]
pub async fn add_car(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CarRequest>,
) -> ApiResult<HttpResponse> {
    let car = NewCar::try_from_parts(
        payload.brand.as_str(),
        payload.model.as_str(),
        payload.vin.as_str(),
        payload.year.as_str(),
    )?;
    let stored = state.cars.add_car(user.id(), car).await?;
    Ok(HttpResponse::Created().json(CarResponse::from(stored)))
}

/// The caller's cars that have not been removed.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    responses(
        (status = 200, description = "Cars", body = [CarResponse]),
        (status = 401, description = "Unauthenticated", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "listCars"
)]
#[get("/cars")]
pub async fn list_cars(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<CarResponse>>> {
    let cars = state.cars.list_cars(user.id()).await?;
    Ok(web::Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Soft-delete one of the caller's cars.
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    params(("id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 204, description = "Car removed"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Car belongs to another user", body = ErrorSchema),
        (status = 404, description = "Car not found", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "removeCar"
)]
#[delete("/cars/{id}")]
pub async fn remove_car(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let car_id = parse_path_id(&path, CarId::parse)?;
    state.cars.remove_car(user.id(), car_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "cars_tests.rs"]
mod tests;
