//! Car domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::access_gate::map_car_repository_error;
use crate::domain::ports::{CarCommand, CarRepository};
use crate::domain::{AccessGate, Car, CarId, Error, NewCar, UserId};

/// Car service implementing [`CarCommand`].
#[derive(Clone)]
pub struct CarService {
    cars: Arc<dyn CarRepository>,
    gate: AccessGate,
}

impl CarService {
    pub fn new(cars: Arc<dyn CarRepository>, gate: AccessGate) -> Self {
        Self { cars, gate }
    }
}

#[async_trait]
impl CarCommand for CarService {
    async fn add_car(&self, owner: UserId, car: NewCar) -> Result<Car, Error> {
        let stored = self
            .cars
            .insert(owner, &car)
            .await
            .map_err(map_car_repository_error)?;
        info!(user = %owner, car = %stored.id, "car added");
        Ok(stored)
    }

    async fn list_cars(&self, owner: UserId) -> Result<Vec<Car>, Error> {
        self.cars
            .list_active_for_owner(owner)
            .await
            .map_err(map_car_repository_error)
    }

    async fn remove_car(&self, owner: UserId, car_id: CarId) -> Result<(), Error> {
        let car = self.gate.owned_car(owner, car_id).await?;
        if car.deleted {
            return Err(Error::not_found(format!("car {car_id} not found")));
        }
        self.cars
            .mark_deleted(car_id)
            .await
            .map_err(map_car_repository_error)?;
        info!(user = %owner, car = %car_id, "car removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::fixtures::car;
    use crate::domain::ports::{
        CarRepositoryError, MockCarRepository, MockOrderRepository, MockSessionStore,
    };
    use crate::domain::ErrorCode;

    fn service(cars: MockCarRepository) -> CarService {
        let cars: Arc<dyn CarRepository> = Arc::new(cars);
        let gate = AccessGate::new(
            Arc::new(MockSessionStore::new()),
            Arc::clone(&cars),
            Arc::new(MockOrderRepository::new()),
        );
        CarService::new(cars, gate)
    }

    #[rstest]
    #[tokio::test]
    async fn add_assigns_owner() {
        let mut cars = MockCarRepository::new();
        cars.expect_insert()
            .withf(|owner, _| *owner == UserId::new(7))
            .return_once(|_, _| Ok(car(3, 7)));
        let new_car = NewCar::try_from_parts("Toyota", "Corolla", "1HGCM82633A004352", "2019")
            .expect("valid car");

        let stored = service(cars)
            .add_car(UserId::new(7), new_car)
            .await
            .expect("car added");
        assert_eq!(stored.owner_id, UserId::new(7));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_soft_deletes_owned_car() {
        let mut cars = MockCarRepository::new();
        cars.expect_find_by_id().return_once(|_| Ok(Some(car(3, 7))));
        cars.expect_mark_deleted()
            .withf(|id| *id == CarId::new(3))
            .times(1)
            .return_once(|_| Ok(()));

        service(cars)
            .remove_car(UserId::new(7), CarId::new(3))
            .await
            .expect("car removed");
    }

    #[rstest]
    #[tokio::test]
    async fn remove_refuses_foreign_car() {
        let mut cars = MockCarRepository::new();
        cars.expect_find_by_id().return_once(|_| Ok(Some(car(3, 8))));
        cars.expect_mark_deleted().times(0);

        let err = service(cars)
            .remove_car(UserId::new(7), CarId::new(3))
            .await
            .expect_err("foreign car");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn removing_twice_reports_missing() {
        let mut cars = MockCarRepository::new();
        cars.expect_find_by_id().return_once(|_| {
            let mut deleted = car(3, 7);
            deleted.deleted = true;
            Ok(Some(deleted))
        });
        cars.expect_mark_deleted().times(0);

        let err = service(cars)
            .remove_car(UserId::new(7), CarId::new(3))
            .await
            .expect_err("already removed");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn list_maps_connection_failure() {
        let mut cars = MockCarRepository::new();
        cars.expect_list_active_for_owner()
            .return_once(|_| Err(CarRepositoryError::connection("refused")));

        let err = service(cars)
            .list_cars(UserId::new(7))
            .await
            .expect_err("offline");
        assert_eq!(err.code(), ErrorCode::StorageUnavailable);
    }
}
