//! Driving port for the customer side of order threads.

use async_trait::async_trait;

use crate::domain::{Error, Message, MessageText, OrderId, UserId};

/// Thread use-cases for the order owner.
#[async_trait]
pub trait MessageCommand: Send + Sync {
    /// Append a customer message to an order that is not closed.
    async fn post_customer_message(
        &self,
        customer: UserId,
        order: OrderId,
        text: MessageText,
    ) -> Result<Message, Error>;

    /// Read the thread and clear the unread flag.
    async fn list_messages(&self, customer: UserId, order: OrderId)
    -> Result<Vec<Message>, Error>;
}
