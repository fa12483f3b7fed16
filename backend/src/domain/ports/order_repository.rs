//! Port for service order persistence.

use async_trait::async_trait;

use crate::domain::{
    CarId, Cost, Order, OrderDescription, OrderId, OrderStatus, ServiceDate, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
    }
}

/// Order data handed to storage. New orders are always `Open` and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub owner_id: UserId,
    pub car_id: CarId,
    pub service_date: ServiceDate,
    pub cost: Cost,
    pub description: OrderDescription,
}

/// Storage for service orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order in status `Open` with the unread flag cleared.
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError>;

    /// Point lookup by id.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError>;

    /// Orders of `owner` whose status is in `statuses`, ordered by status then id.
    async fn list_for_owner(
        &self,
        owner: UserId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Overwrite the status column.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderRepositoryError>;

    /// Overwrite the customer unread flag.
    async fn set_unread(&self, id: OrderId, unread: bool) -> Result<(), OrderRepositoryError>;
}
