//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories and session store using Diesel
//! - **memory_sessions**: process-local session store
//! - **password**: Argon2id password digests
//! - **profile_images**: profile image files under a single directory
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory_sessions;
pub mod password;
pub mod persistence;
pub mod profile_images;

pub use memory_sessions::InMemorySessionStore;
pub use password::Argon2PasswordHasher;
pub use profile_images::CapStdProfileImageStore;
