//! Builders for domain values shared by unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Author, Car, CarBrand, CarId, CarModel, Cost, Message, MessageId, MessageText, ModelYear,
    Order, OrderDescription, OrderId, OrderStatus, ServiceDate, UserId, Vin, YearBounds,
};

pub(crate) fn car(id: i64, owner: i64) -> Car {
    Car {
        id: CarId::new(id),
        owner_id: UserId::new(owner),
        brand: CarBrand::new("Toyota").expect("valid brand"),
        model: CarModel::new("Corolla").expect("valid model"),
        vin: Vin::new("1HGCM82633A004352").expect("valid vin"),
        year: ModelYear::parse("2019").expect("valid year"),
        deleted: false,
    }
}

pub(crate) fn order(id: i64, owner: i64, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        owner_id: UserId::new(owner),
        car_id: CarId::new(1),
        status,
        service_date: ServiceDate::parse("5", "6", "2024", YearBounds::default())
            .expect("valid date"),
        cost: Cost::parse("150").expect("valid cost"),
        description: OrderDescription::new("oil change").expect("valid description"),
        has_unread_message: false,
    }
}

pub(crate) fn instant(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 5, 9, 30, second)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn message(id: i64, order: i64, author: Author, text: &str) -> Message {
    Message {
        id: MessageId::new(id),
        order_id: OrderId::new(order),
        author,
        text: MessageText::new(text).expect("valid text"),
        sent_at: instant(0),
    }
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock frozen at [`instant`]`(second)`.
pub(crate) fn clock_at(second: u32) -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: instant(second),
    })
}
