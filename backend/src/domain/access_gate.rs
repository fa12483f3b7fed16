//! Access-control gate shared by every protected use-case.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. identity: the session token resolves to a user;
//! 2. existence: the referenced car or order exists;
//! 3. ownership: it belongs to the caller;
//! 4. state: the order's status allows the action.
//!
//! A missing resource and a resource owned by someone else therefore surface
//! as `NotFound` and `Forbidden` respectively.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    CarRepository, CarRepositoryError, OrderRepository, OrderRepositoryError,
    SessionAuthenticator, SessionStore, SessionStoreError,
};
use crate::domain::{Car, CarId, Error, Order, OrderId, SessionToken, UserId};

pub(crate) fn map_session_store_error(error: SessionStoreError) -> Error {
    match error {
        SessionStoreError::Unavailable { message } => {
            Error::storage_unavailable(format!("session store unavailable: {message}"))
        }
    }
}

pub(crate) fn map_car_repository_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("car repository unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car repository error: {message}"))
        }
    }
}

pub(crate) fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
    }
}

/// Identity and ownership resolver.
#[derive(Clone)]
pub struct AccessGate {
    sessions: Arc<dyn SessionStore>,
    cars: Arc<dyn CarRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl AccessGate {
    /// Build a gate over the session store and the owned-resource repositories.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        cars: Arc<dyn CarRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            sessions,
            cars,
            orders,
        }
    }

    /// Whether `user` owns car `car_id`. Fails `NotFound` when it does not exist.
    pub async fn owns_car(&self, user: UserId, car_id: CarId) -> Result<bool, Error> {
        self.load_car(car_id).await.map(|car| car.owner_id == user)
    }

    /// Whether `user` owns order `order_id`. Fails `NotFound` when it does not exist.
    pub async fn owns_order(&self, user: UserId, order_id: OrderId) -> Result<bool, Error> {
        self.load_order(order_id)
            .await
            .map(|order| order.owner_id == user)
    }

    /// Load a car the caller owns.
    pub async fn owned_car(&self, user: UserId, car_id: CarId) -> Result<Car, Error> {
        let car = self.load_car(car_id).await?;
        if car.owner_id != user {
            warn!(user = %user, car = %car_id, "car access denied");
            return Err(Error::forbidden(format!("car {car_id} belongs to another user")));
        }
        Ok(car)
    }

    /// Load an order the caller owns.
    pub async fn owned_order(&self, user: UserId, order_id: OrderId) -> Result<Order, Error> {
        let order = self.load_order(order_id).await?;
        if order.owner_id != user {
            warn!(user = %user, order = %order_id, "order access denied");
            return Err(Error::forbidden(format!(
                "order {order_id} belongs to another user"
            )));
        }
        Ok(order)
    }

    /// Orders may only be placed against a live car of the caller.
    ///
    /// Soft-deleted cars are reported as missing.
    pub async fn can_customer_create_order_for_car(
        &self,
        user: UserId,
        car_id: CarId,
    ) -> Result<Car, Error> {
        let car = self.owned_car(user, car_id).await?;
        if car.deleted {
            return Err(Error::not_found(format!("car {car_id} not found")));
        }
        Ok(car)
    }

    /// Load an order the caller owns and may still write into.
    pub async fn can_customer_append_message(
        &self,
        user: UserId,
        order_id: OrderId,
    ) -> Result<Order, Error> {
        let order = self.owned_order(user, order_id).await?;
        if !order.can_customer_append_message() {
            return Err(Error::forbidden(format!("order {order_id} is closed")));
        }
        Ok(order)
    }

    pub(crate) async fn load_car(&self, car_id: CarId) -> Result<Car, Error> {
        self.cars
            .find_by_id(car_id)
            .await
            .map_err(map_car_repository_error)?
            .ok_or_else(|| Error::not_found(format!("car {car_id} not found")))
    }

    pub(crate) async fn load_order(&self, order_id: OrderId) -> Result<Order, Error> {
        self.orders
            .find_by_id(order_id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {order_id} not found")))
    }
}

#[async_trait]
impl SessionAuthenticator for AccessGate {
    async fn authenticate(&self, token: Option<&str>) -> Result<UserId, Error> {
        let raw = token.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(Error::unauthenticated("login required"));
        }
        let Some(token) = SessionToken::parse(raw) else {
            return Err(Error::invalid_session("session is not valid"));
        };
        self.sessions
            .resolve(&token)
            .await
            .map_err(map_session_store_error)?
            .ok_or_else(|| Error::invalid_session("session is not valid"))
    }
}

#[cfg(test)]
#[path = "access_gate_tests.rs"]
mod tests;
