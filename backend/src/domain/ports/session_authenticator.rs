//! Driving port resolving a session carrier to the acting user.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// First step of every protected operation.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Resolve the raw token from the session carrier.
    ///
    /// Fails with `Unauthenticated` when the carrier is absent or empty and
    /// with `InvalidSession` when the token is unknown.
    async fn authenticate(&self, token: Option<&str>) -> Result<UserId, Error>;
}
