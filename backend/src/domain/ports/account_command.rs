//! Driving port for account use-cases: registration, login, logout, and the
//! caller's own profile.
//!
//! Inbound adapters call this port without knowing the backing storage, so
//! handler tests can substitute in-memory adapters.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Profile, Registration, SessionToken, UserId};

/// Largest accepted profile image, in bytes.
pub const PROFILE_IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Account use-cases.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Duplicate logins fail validation on `login`.
    async fn register(&self, registration: Registration) -> Result<UserId, Error>;

    /// Verify credentials and open a session.
    async fn login(&self, credentials: LoginCredentials) -> Result<SessionToken, Error>;

    /// Close a session. Unknown tokens succeed.
    async fn logout(&self, token: SessionToken) -> Result<(), Error>;

    /// Profile of the authenticated caller.
    async fn profile(&self, user: UserId) -> Result<Profile, Error>;

    /// Store or replace the caller's profile image.
    async fn save_profile_image(&self, user: UserId, bytes: Vec<u8>) -> Result<(), Error>;

    /// Bytes of the caller's profile image.
    async fn profile_image(&self, user: UserId) -> Result<Vec<u8>, Error>;

    /// Remove the caller's profile image. Succeeds when none is stored.
    async fn delete_profile_image(&self, user: UserId) -> Result<(), Error>;
}
