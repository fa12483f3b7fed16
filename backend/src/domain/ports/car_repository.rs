//! Port for car persistence.

use async_trait::async_trait;

use crate::domain::{Car, CarId, NewCar, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by car repository adapters.
    pub enum CarRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "car repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "car repository query failed: {message}",
    }
}

/// Storage for customer cars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Insert a car owned by `owner`.
    async fn insert(&self, owner: UserId, car: &NewCar) -> Result<Car, CarRepositoryError>;

    /// Point lookup, soft-deleted rows included.
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// Non-deleted cars of `owner`, ordered by id ascending.
    async fn list_active_for_owner(&self, owner: UserId) -> Result<Vec<Car>, CarRepositoryError>;

    /// Set the soft-delete flag.
    async fn mark_deleted(&self, id: CarId) -> Result<(), CarRepositoryError>;
}
