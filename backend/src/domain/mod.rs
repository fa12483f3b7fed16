//! Domain primitives, aggregates, and services.
//!
//! Purpose: model accounts, cars, service orders, and order threads with
//! validated types, and host the use-case services behind the driving ports.
//! Nothing here knows about HTTP or SQL; adapters live under `inbound` and
//! `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - OrderStatus: the Open, Confirmed, Closed state machine.
//! - AccessGate: identity, existence, ownership, and state checks.

pub mod error;
pub mod ports;

mod access_gate;
mod account;
mod account_service;
mod car;
mod car_service;
mod ids;
mod message;
mod message_service;
mod order;
mod order_service;
mod session;
mod staff_service;
mod station;
mod trace_id;
mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::access_gate::AccessGate;
pub use self::account::{
    Account, CREDENTIAL_MIN_CHARS, Login, LoginCredentials, NewAccount, Password, PasswordDigest,
    PersonName, Phone, Profile, Registration, RegistrationParts,
};
pub use self::account_service::{AccountService, AccountServicePorts};
pub use self::car::{Car, CarBrand, CarModel, ModelYear, NewCar, Vin};
pub use self::car_service::CarService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CarId, MessageId, OrderId, UserId};
pub use self::message::{Author, Message, MessageText, NewMessage, sort_thread};
pub use self::message_service::MessageService;
pub use self::order::{
    Cost, IllegalTransition, Order, OrderDescription, OrderDraft, OrderDraftParts, OrderListing,
    OrderStatus, ServiceDate, YearBounds,
};
pub use self::order_service::OrderService;
pub use self::session::SessionToken;
pub use self::staff_service::StaffOrdersService;
pub use self::station::{StationPorts, StationServices};
pub use self::trace_id::TraceId;
pub use self::validation::{FieldViolation, Rule};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use service_station::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
