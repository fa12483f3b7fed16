//! Order domain service.
//!
//! Creation validates the raw request first, then asks the gate whether the
//! referenced car may carry a new order, then stores it as `Open`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::access_gate::map_order_repository_error;
use crate::domain::ports::{NewOrder, OrderCommand, OrderRepository, OrderRequest};
use crate::domain::{
    AccessGate, Error, Order, OrderDraft, OrderDraftParts, OrderId, OrderListing, UserId,
    YearBounds,
};

/// Order service implementing [`OrderCommand`].
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    gate: AccessGate,
    bounds: YearBounds,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, gate: AccessGate, bounds: YearBounds) -> Self {
        Self {
            orders,
            gate,
            bounds,
        }
    }
}

#[async_trait]
impl OrderCommand for OrderService {
    async fn create_order(&self, owner: UserId, request: OrderRequest) -> Result<Order, Error> {
        let draft = OrderDraft::try_from_parts(
            OrderDraftParts {
                day: &request.day,
                month: &request.month,
                year: &request.year,
                car_id: &request.car_id,
                description: &request.description,
                cost: &request.cost,
            },
            self.bounds,
        )?;
        self.gate
            .can_customer_create_order_for_car(owner, draft.car_id)
            .await?;

        let OrderDraft {
            service_date,
            car_id,
            description,
            cost,
        } = draft;
        let order = self
            .orders
            .insert(&NewOrder {
                owner_id: owner,
                car_id,
                service_date,
                cost,
                description,
            })
            .await
            .map_err(map_order_repository_error)?;
        info!(user = %owner, order = %order.id, car = %car_id, "order created");
        Ok(order)
    }

    async fn list_orders(&self, owner: UserId, listing: OrderListing) -> Result<Vec<Order>, Error> {
        self.orders
            .list_for_owner(owner, listing.statuses())
            .await
            .map_err(map_order_repository_error)
    }

    async fn get_order(&self, owner: UserId, order: OrderId) -> Result<Order, Error> {
        self.gate.owned_order(owner, order).await
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
