//! PostgreSQL-backed `OrderRepository`.
//!
//! Status is stored as its numeric code. A row holding an unknown code or a
//! negative cost is reported as a query error instead of being coerced.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewOrder, OrderRepository, OrderRepositoryError};
use crate::domain::{
    CarId, Cost, Order, OrderDescription, OrderId, OrderStatus, ServiceDate, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Diesel implementation of [`OrderRepository`].
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    map_basic_pool_error(error, OrderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    map_basic_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn row_to_order(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    let status = OrderStatus::from_code(row.status).ok_or_else(|| {
        OrderRepositoryError::query(format!(
            "order {} has unknown status code {}",
            row.id, row.status
        ))
    })?;
    let cost = Cost::from_cents(row.cost_cents).ok_or_else(|| {
        OrderRepositoryError::query(format!("order {} has a negative cost", row.id))
    })?;
    Ok(Order {
        id: OrderId::new(row.id),
        owner_id: UserId::new(row.owner_id),
        car_id: CarId::new(row.car_id),
        status,
        service_date: ServiceDate::from_stored(row.service_date),
        cost,
        description: OrderDescription::from_stored(row.description),
        has_unread_message: row.has_unread_message,
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewOrderRow {
            owner_id: order.owner_id.get(),
            car_id: order.car_id.get(),
            status: OrderStatus::Open.code(),
            service_date: order.service_date.as_naive_date(),
            cost_cents: order.cost.cents(),
            description: order.description.as_ref(),
            has_unread_message: false,
        };

        let stored = diesel::insert_into(orders::table)
            .values(&row)
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_order(stored)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = orders::table
            .find(id.get())
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_order).transpose()
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let codes: Vec<i16> = statuses.iter().map(|status| status.code()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OrderRow> = orders::table
            .filter(orders::owner_id.eq(owner.get()))
            .filter(orders::status.eq_any(codes))
            .order((orders::status.asc(), orders::id.asc()))
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_order).collect()
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(orders::table.find(id.get()))
            .set(orders::status.eq(status.code()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn set_unread(&self, id: OrderId, unread: bool) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(orders::table.find(id.get()))
            .set(orders::has_unread_message.eq(unread))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    fn row(status: i16, cost_cents: i64) -> OrderRow {
        OrderRow {
            id: 11,
            owner_id: 3,
            car_id: 4,
            status,
            service_date: NaiveDate::from_ymd_opt(2024, 6, 5).expect("valid date"),
            cost_cents,
            description: "brake pads".to_owned(),
            has_unread_message: true,
        }
    }

    #[rstest]
    fn stored_row_becomes_order() {
        let order = row_to_order(row(2, 9_950)).expect("valid row");
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.cost.to_string(), "99.50");
        assert_eq!(order.service_date.to_string(), "06-05-2024");
        assert!(order.has_unread_message);
    }

    #[rstest]
    #[case(row(9, 100))]
    #[case(row(1, -1))]
    fn corrupt_rows_are_query_errors(#[case] corrupt: OrderRow) {
        let err = row_to_order(corrupt).expect_err("corrupt row");
        assert!(matches!(err, OrderRepositoryError::Query { .. }));
    }
}
