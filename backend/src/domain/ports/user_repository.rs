//! Port for customer account persistence.

use async_trait::async_trait;

use crate::domain::{Account, NewAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Another account already holds the login.
        DuplicateLogin { login: String } =>
            "login {login} is already registered",
    }
}

/// Storage for customer accounts. Logins are stored lower-cased.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, failing with `DuplicateLogin` on collision.
    async fn create(&self, account: &NewAccount) -> Result<UserId, UserRepositoryError>;

    /// Look up an account by normalised login.
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, UserRepositoryError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, UserRepositoryError>;

    /// Record whether the account has a stored profile image.
    async fn set_profile_image(
        &self,
        id: UserId,
        present: bool,
    ) -> Result<(), UserRepositoryError>;
}
