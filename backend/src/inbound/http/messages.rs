//! Order thread handlers.
//!
//! ```text
//! GET /api/v1/orders/{id}/messages
//! POST /api/v1/orders/{id}/messages {"text":"Is the car ready?"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Message, MessageText, OrderId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Body for `POST /api/v1/orders/{id}/messages`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageRequest {
    pub text: String,
}

/// Read the thread of one of the caller's orders.
///
/// Reading marks staff replies as seen.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/messages",
    params(("id" = i64, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Thread, oldest first", body = [MessageSchema]),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Order belongs to another user", body = ErrorSchema),
        (status = 404, description = "Order not found", body = ErrorSchema)
    ),
    tags = ["messages"],
    operation_id = "listMessages"
)]
#[get("/orders/{id}/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Message>>> {
    let order_id = parse_path_id(&path, OrderId::parse)?;
    state
        .messages
        .list_messages(user.id(), order_id)
        .await
        .map(web::Json)
}

/// Append a customer message to an order that is not closed.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/messages",
    params(("id" = i64, Path, description = "Order identifier")),
    request_body = MessageRequest,
    responses(
        (status = 201, description = "Message stored", body = MessageSchema),
        (status = 400, description = "Empty or oversized text", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Order closed or not owned", body = ErrorSchema),
        (status = 404, description = "Order not found", body = ErrorSchema)
    ),
    tags = ["messages"],
    operation_id = "postMessage"
)]
#[post("/orders/{id}/messages")]
pub async fn post_message(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<MessageRequest>,
) -> ApiResult<HttpResponse> {
    let order_id = parse_path_id(&path, OrderId::parse)?;
    let text = MessageText::new(&payload.text)?;
    let message = state
        .messages
        .post_customer_message(user.id(), order_id, text)
        .await?;
    Ok(HttpResponse::Created().json(message))
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
