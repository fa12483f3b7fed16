//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Repositories convert them
//! into domain values at the boundary.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{cars, messages, orders, sessions, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub login: String,
    pub password_digest: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub has_profile_image: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub login: &'a str,
    pub password_digest: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
}

/// Row read from `cars`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRow {
    pub id: i64,
    pub owner_id: i64,
    pub brand: String,
    pub model: String,
    pub vin: String,
    pub model_year: i32,
    pub deleted: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cars)]
pub(crate) struct NewCarRow<'a> {
    pub owner_id: i64,
    pub brand: &'a str,
    pub model: &'a str,
    pub vin: &'a str,
    pub model_year: i32,
}

/// Row read from `orders`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i64,
    pub owner_id: i64,
    pub car_id: i64,
    pub status: i16,
    pub service_date: NaiveDate,
    pub cost_cents: i64,
    pub description: String,
    pub has_unread_message: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub owner_id: i64,
    pub car_id: i64,
    pub status: i16,
    pub service_date: NaiveDate,
    pub cost_cents: i64,
    pub description: &'a str,
    pub has_unread_message: bool,
}

/// Row read from `messages`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: i64,
    pub order_id: i64,
    pub from_staff: bool,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessageRow<'a> {
    pub order_id: i64,
    pub from_staff: bool,
    pub body: &'a str,
    pub sent_at: DateTime<Utc>,
}

/// Row read from `sessions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow {
    pub token: Uuid,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
