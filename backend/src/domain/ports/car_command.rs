//! Driving port for a customer's cars.

use async_trait::async_trait;

use crate::domain::{Car, CarId, Error, NewCar, UserId};

/// Car use-cases, always on behalf of an authenticated owner.
#[async_trait]
pub trait CarCommand: Send + Sync {
    /// Register a car for `owner`.
    async fn add_car(&self, owner: UserId, car: NewCar) -> Result<Car, Error>;

    /// Non-deleted cars of `owner`.
    async fn list_cars(&self, owner: UserId) -> Result<Vec<Car>, Error>;

    /// Soft-delete a car after existence and ownership checks.
    async fn remove_car(&self, owner: UserId, car: CarId) -> Result<(), Error>;
}
