//! Domain ports.
//!
//! Driven ports (`*Repository`, [`SessionStore`], [`PasswordHasher`],
//! [`ProfileImageStore`]) are implemented by outbound adapters. Driving ports
//! (`*Command`, [`SessionAuthenticator`]) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod car_command;
mod car_repository;
mod message_command;
mod message_repository;
mod order_command;
mod order_repository;
mod password_hasher;
mod profile_image_store;
mod session_authenticator;
mod session_store;
mod staff_orders_command;
mod user_repository;

pub use account_command::{AccountCommand, PROFILE_IMAGE_MAX_BYTES};
pub use car_command::CarCommand;
#[cfg(test)]
pub use car_repository::MockCarRepository;
pub use car_repository::{CarRepository, CarRepositoryError};
pub use message_command::MessageCommand;
#[cfg(test)]
pub use message_repository::MockMessageRepository;
pub use message_repository::{MessageRepository, MessageRepositoryError};
pub use order_command::{OrderCommand, OrderRequest};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{NewOrder, OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile_image_store::MockProfileImageStore;
pub use profile_image_store::{ProfileImageStore, ProfileImageStoreError};
pub use session_authenticator::SessionAuthenticator;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
pub use staff_orders_command::StaffOrdersCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
