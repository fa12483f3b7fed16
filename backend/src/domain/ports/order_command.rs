//! Driving port for a customer's service orders.

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderId, OrderListing, UserId};

/// Raw order fields. Validation needs the configured year bounds, so it runs
/// inside the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    pub day: String,
    pub month: String,
    pub year: String,
    pub car_id: String,
    pub description: String,
    pub cost: String,
}

/// Order use-cases, always on behalf of an authenticated customer.
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Validate and place an order against one of the caller's cars.
    async fn create_order(&self, owner: UserId, request: OrderRequest) -> Result<Order, Error>;

    /// Active or closed orders of `owner`.
    async fn list_orders(&self, owner: UserId, listing: OrderListing) -> Result<Vec<Order>, Error>;

    /// A single order owned by the caller.
    async fn get_order(&self, owner: UserId, order: OrderId) -> Result<Order, Error>;
}
