//! Back-office operations on orders.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::access_gate::map_order_repository_error;
use crate::domain::message_service::map_message_repository_error;
use crate::domain::ports::{MessageRepository, OrderRepository, StaffOrdersCommand};
use crate::domain::{
    AccessGate, Author, Error, Message, MessageText, NewMessage, Order, OrderId, OrderStatus, Rule,
};

/// Staff service implementing [`StaffOrdersCommand`].
#[derive(Clone)]
pub struct StaffOrdersService {
    messages: Arc<dyn MessageRepository>,
    orders: Arc<dyn OrderRepository>,
    gate: AccessGate,
    clock: Arc<dyn Clock>,
}

impl StaffOrdersService {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        orders: Arc<dyn OrderRepository>,
        gate: AccessGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            messages,
            orders,
            gate,
            clock,
        }
    }
}

#[async_trait]
impl StaffOrdersCommand for StaffOrdersService {
    async fn advance_status(&self, order_id: OrderId, next: OrderStatus) -> Result<Order, Error> {
        let mut order = self.gate.load_order(order_id).await?;
        let status = order.status.transition_to(next).map_err(|err| {
            warn!(order = %order_id, from = %err.from, to = %err.to, "status change refused");
            Error::forbidden(err.to_string()).with_details(json!({
                "field": "status",
                "rule": Rule::IllegalTransition.as_str(),
                "from": err.from.to_string(),
                "to": err.to.to_string(),
            }))
        })?;
        self.orders
            .update_status(order_id, status)
            .await
            .map_err(map_order_repository_error)?;
        info!(order = %order_id, status = %status, "order status advanced");
        order.status = status;
        Ok(order)
    }

    async fn post_staff_message(
        &self,
        order_id: OrderId,
        text: MessageText,
    ) -> Result<Message, Error> {
        self.gate.load_order(order_id).await?;
        let message = self
            .messages
            .append(&NewMessage {
                order_id,
                author: Author::Staff,
                text,
                sent_at: self.clock.utc(),
            })
            .await
            .map_err(map_message_repository_error)?;
        self.orders
            .set_unread(order_id, true)
            .await
            .map_err(map_order_repository_error)?;
        info!(order = %order_id, message = %message.id, "staff message posted");
        Ok(message)
    }
}
