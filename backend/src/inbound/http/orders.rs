//! Order API handlers.
//!
//! ```text
//! GET /api/v1/orders?closed=false
//! POST /api/v1/orders {"day":"5","month":"6","year":"2026","carId":1,"description":"Oil change","cost":"150"}
//! GET /api/v1/orders/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::OrderRequest;
use crate::domain::{Order, OrderId, OrderListing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FormText, parse_path_id};

/// Body for `POST /api/v1/orders`. Numeric fields may be strings or numbers.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    #[schema(value_type = String, example = "5")]
    pub day: FormText,
    #[schema(value_type = String, example = "6")]
    pub month: FormText,
    #[schema(value_type = String, example = "2026")]
    pub year: FormText,
    #[schema(value_type = String, example = "1")]
    pub car_id: FormText,
    #[schema(value_type = String, example = "Replace brake pads")]
    pub description: FormText,
    #[schema(value_type = String, example = "150.00")]
    pub cost: FormText,
}

impl From<OrderCreateRequest> for OrderRequest {
    fn from(value: OrderCreateRequest) -> Self {
        Self {
            day: value.day.to_string(),
            month: value.month.to_string(),
            year: value.year.to_string(),
            car_id: value.car_id.to_string(),
            description: value.description.to_string(),
            cost: value.cost.to_string(),
        }
    }
}

/// Query for `GET /api/v1/orders`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// `true` lists closed orders, otherwise open and confirmed ones.
    #[serde(default)]
    pub closed: bool,
}

/// An order as shown to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub car_id: i64,
    #[schema(example = "open")]
    pub status: String,
    #[schema(example = "06-05-2026")]
    pub service_date: String,
    #[schema(example = "150.00")]
    pub cost: String,
    pub description: String,
    pub has_unread_message: bool,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.get(),
            car_id: order.car_id.get(),
            status: order.status.to_string(),
            service_date: order.service_date.to_string(),
            cost: order.cost.to_string(),
            description: order.description.as_ref().to_owned(),
            has_unread_message: order.has_unread_message,
        }
    }
}

/// Place an order for one of the caller's cars.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = OrderCreateRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Car belongs to another user", body = ErrorSchema),
        (status = 404, description = "Car not found", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<OrderCreateRequest>,
) -> ApiResult<HttpResponse> {
    let order = state
        .orders
        .create_order(user.id(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// The caller's active or closed orders.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders", body = [OrderResponse]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<OrderListQuery>,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let listing = OrderListing::from_closed_flag(query.closed);
    let orders = state.orders.list_orders(user.id(), listing).await?;
    Ok(web::Json(
        orders.into_iter().map(OrderResponse::from).collect(),
    ))
}

/// One of the caller's orders.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order", body = OrderResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Order belongs to another user", body = ErrorSchema),
        (status = 404, description = "Order not found", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderResponse>> {
    let order_id = parse_path_id(&path, OrderId::parse)?;
    let order = state.orders.get_order(user.id(), order_id).await?;
    Ok(web::Json(OrderResponse::from(order)))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
