//! Port for session token storage.

use async_trait::async_trait;

use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Backing store could not be reached.
        Unavailable { message: String } =>
            "session store unavailable: {message}",
    }
}

/// Maps session tokens to the account that logged in.
///
/// Implementations must tolerate concurrent `create`, `resolve`, and `revoke`
/// calls. A user may hold any number of live tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issue a fresh token for `user`.
    async fn create(&self, user: UserId) -> Result<SessionToken, SessionStoreError>;

    /// Owner of `token`, or `None` when unknown or expired.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError>;

    /// Forget `token`. Unknown tokens are not an error.
    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}
