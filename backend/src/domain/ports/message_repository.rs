//! Port for order thread persistence.

use async_trait::async_trait;

use crate::domain::{Message, NewMessage, OrderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by message repository adapters.
    pub enum MessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "message repository query failed: {message}",
    }
}

/// Append-only storage for order threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message, assigning the next id.
    async fn append(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError>;

    /// Thread of `order`, ordered by timestamp then id ascending.
    async fn list_for_order(&self, order: OrderId) -> Result<Vec<Message>, MessageRepositoryError>;
}
