//! Tests for the order service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::fixtures::{car, order};
use crate::domain::ports::{
    CarRepository, MockCarRepository, MockOrderRepository, MockSessionStore,
};
use crate::domain::{CarId, ErrorCode, OrderStatus};

fn request() -> OrderRequest {
    OrderRequest {
        day: "5".into(),
        month: "6".into(),
        year: "2024".into(),
        car_id: "1".into(),
        description: "oil change".into(),
        cost: "150".into(),
    }
}

fn service(cars: MockCarRepository, orders: MockOrderRepository) -> OrderService {
    let cars: Arc<dyn CarRepository> = Arc::new(cars);
    let orders: Arc<dyn OrderRepository> = Arc::new(orders);
    let gate = AccessGate::new(Arc::new(MockSessionStore::new()), cars, Arc::clone(&orders));
    OrderService::new(orders, gate, YearBounds::default())
}

#[rstest]
#[tokio::test]
async fn create_stores_open_order_for_owned_car() {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id()
        .withf(|id| *id == CarId::new(1))
        .return_once(|_| Ok(Some(car(1, 7))));
    let mut orders = MockOrderRepository::new();
    orders
        .expect_insert()
        .withf(|new_order| {
            new_order.owner_id == UserId::new(7)
                && new_order.car_id == CarId::new(1)
                && new_order.cost.cents() == 15_000
        })
        .times(1)
        .return_once(|_| Ok(order(10, 7, OrderStatus::Open)));

    let created = service(cars, orders)
        .create_order(UserId::new(7), request())
        .await
        .expect("order created");
    assert_eq!(created.status, OrderStatus::Open);
    assert!(!created.has_unread_message);
}

#[rstest]
#[tokio::test]
async fn create_validates_before_touching_storage() {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id().times(0);
    let mut orders = MockOrderRepository::new();
    orders.expect_insert().times(0);

    let mut bad = request();
    bad.month = "13".into();
    let err = service(cars, orders)
        .create_order(UserId::new(7), bad)
        .await
        .expect_err("bad month");
    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        err.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
        Some("month")
    );
}

#[rstest]
#[case(Some(8), false, ErrorCode::Forbidden)]
#[case(Some(7), true, ErrorCode::NotFound)]
#[case(None, false, ErrorCode::NotFound)]
#[tokio::test]
async fn create_refuses_unusable_car(
    #[case] owner: Option<i64>,
    #[case] deleted: bool,
    #[case] expected: ErrorCode,
) {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id().return_once(move |_| {
        Ok(owner.map(|owner| {
            let mut stored = car(1, owner);
            stored.deleted = deleted;
            stored
        }))
    });
    let mut orders = MockOrderRepository::new();
    orders.expect_insert().times(0);

    let err = service(cars, orders)
        .create_order(UserId::new(7), request())
        .await
        .expect_err("unusable car");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[case(false, &[OrderStatus::Open, OrderStatus::Confirmed])]
#[case(true, &[OrderStatus::Closed])]
#[tokio::test]
async fn list_passes_status_filter(#[case] closed: bool, #[case] expected: &'static [OrderStatus]) {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_list_for_owner()
        .withf(move |owner, statuses| *owner == UserId::new(7) && statuses == expected)
        .return_once(|_, _| Ok(Vec::new()));

    let listed = service(MockCarRepository::new(), orders)
        .list_orders(UserId::new(7), OrderListing::from_closed_flag(closed))
        .await
        .expect("listing");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn get_hides_foreign_order() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(order(10, 8, OrderStatus::Open))));

    let err = service(MockCarRepository::new(), orders)
        .get_order(UserId::new(7), OrderId::new(10))
        .await
        .expect_err("foreign order");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}
