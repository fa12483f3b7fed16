//! PostgreSQL-backed `CarRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarBrand, CarId, CarModel, ModelYear, NewCar, UserId, Vin};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CarRow, NewCarRow};
use super::pool::{DbPool, PoolError};
use super::schema::cars;

/// Diesel implementation of [`CarRepository`].
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CarRepositoryError {
    map_basic_pool_error(error, CarRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CarRepositoryError {
    map_basic_diesel_error(
        error,
        CarRepositoryError::query,
        CarRepositoryError::connection,
    )
}

fn row_to_car(row: CarRow) -> Car {
    Car {
        id: CarId::new(row.id),
        owner_id: UserId::new(row.owner_id),
        brand: CarBrand::from_stored(row.brand),
        model: CarModel::from_stored(row.model),
        vin: Vin::from_stored(row.vin),
        year: ModelYear::from_stored(row.model_year),
        deleted: row.deleted,
    }
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn insert(&self, owner: UserId, car: &NewCar) -> Result<Car, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCarRow {
            owner_id: owner.get(),
            brand: car.brand.as_ref(),
            model: car.model.as_ref(),
            vin: car.vin.as_ref(),
            model_year: car.year.get(),
        };

        diesel::insert_into(cars::table)
            .values(&row)
            .returning(CarRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_car)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        cars::table
            .find(id.get())
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_car))
            .map_err(map_diesel_error)
    }

    async fn list_active_for_owner(&self, owner: UserId) -> Result<Vec<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CarRow> = cars::table
            .filter(cars::owner_id.eq(owner.get()))
            .filter(cars::deleted.eq(false))
            .order(cars::id.asc())
            .select(CarRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_car).collect())
    }

    async fn mark_deleted(&self, id: CarId) -> Result<(), CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(cars::table.find(id.get()))
            .set(cars::deleted.eq(true))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
