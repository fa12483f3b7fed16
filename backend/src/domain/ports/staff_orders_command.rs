//! Driving port for back-office staff.
//!
//! Staff authentication happens outside this crate; callers of this port are
//! trusted and no ownership checks apply.

use async_trait::async_trait;

use crate::domain::{Error, Message, MessageText, Order, OrderId, OrderStatus};

/// Staff use-cases.
#[async_trait]
pub trait StaffOrdersCommand: Send + Sync {
    /// Move an order along its lifecycle.
    async fn advance_status(&self, order: OrderId, next: OrderStatus) -> Result<Order, Error>;

    /// Reply in an order thread and flag it unread for the customer.
    async fn post_staff_message(&self, order: OrderId, text: MessageText)
    -> Result<Message, Error>;
}
