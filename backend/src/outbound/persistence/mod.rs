//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`) and domain values. Connections come from a `bb8` pool through
//! `diesel-async`; the schema is created by embedded migrations.
//!
//! # Example
//!
//! ```no_run
//! use service_station::outbound::persistence::{DbPool, DieselCarRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/station")).await?;
//! let cars = DieselCarRepository::new(pool);
//! # let _ = cars;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_car_repository;
mod diesel_message_repository;
mod diesel_order_repository;
mod diesel_session_store;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_car_repository::DieselCarRepository;
pub use diesel_message_repository::DieselMessageRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_session_store::DieselSessionStore;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
