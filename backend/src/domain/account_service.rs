//! Account domain service: registration, login, logout, and profile.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::access_gate::map_session_store_error;
use crate::domain::ports::{
    AccountCommand, PROFILE_IMAGE_MAX_BYTES, PasswordHashError, PasswordHasher,
    ProfileImageStore, ProfileImageStoreError, SessionStore, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Account, Error, LoginCredentials, NewAccount, Profile, Registration, Rule, SessionToken,
    UserId,
};

const INVALID_CREDENTIALS: &str = "invalid login or password";

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateLogin { login } => duplicate_login(&login),
    }
}

fn duplicate_login(login: &str) -> Error {
    Error::validation_failed(
        "login",
        Rule::Duplicate.as_str(),
        format!("login {login} is already registered"),
    )
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_image_error(error: ProfileImageStoreError) -> Error {
    Error::storage_unavailable(error.to_string())
}

/// Run CPU-bound hashing or synchronous file I/O off the async executor.
async fn run_blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::internal(format!("blocking task failed: {err}")))?
}

/// Collaborators of [`AccountService`].
#[derive(Clone)]
pub struct AccountServicePorts {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub images: Arc<dyn ProfileImageStore>,
}

/// Account service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    images: Arc<dyn ProfileImageStore>,
}

impl AccountService {
    /// Create the service from its ports.
    pub fn new(ports: AccountServicePorts) -> Self {
        let AccountServicePorts {
            users,
            sessions,
            hasher,
            images,
        } = ports;
        Self {
            users,
            sessions,
            hasher,
            images,
        }
    }

    async fn account(&self, user: UserId) -> Result<Account, Error> {
        self.users
            .find_by_id(user)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user} not found")))
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn register(&self, registration: Registration) -> Result<UserId, Error> {
        let Registration {
            login,
            password,
            first_name,
            last_name,
            phone,
        } = registration;

        let existing = self
            .users
            .find_by_login(login.as_ref())
            .await
            .map_err(map_user_repository_error)?;
        if existing.is_some() {
            warn!(login = %login, "registration rejected: login taken");
            return Err(duplicate_login(login.as_ref()));
        }

        let hasher = Arc::clone(&self.hasher);
        let password_digest =
            run_blocking(move || hasher.digest(&password).map_err(map_hash_error)).await?;
        let id = self
            .users
            .create(&NewAccount {
                login: login.clone(),
                password_digest,
                first_name,
                last_name,
                phone,
            })
            .await
            .map_err(map_user_repository_error)?;
        info!(user = %id, login = %login, "account registered");
        Ok(id)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<SessionToken, Error> {
        let Some(account) = self
            .users
            .find_by_login(credentials.login())
            .await
            .map_err(map_user_repository_error)?
        else {
            warn!(login = credentials.login(), "login rejected: unknown login");
            return Err(Error::unauthenticated(INVALID_CREDENTIALS));
        };

        let hasher = Arc::clone(&self.hasher);
        let password = credentials.password().clone();
        let digest = account.password_digest.clone();
        let matches =
            run_blocking(move || hasher.verify(&password, &digest).map_err(map_hash_error))
                .await?;
        if !matches {
            warn!(user = %account.id, "login rejected: wrong password");
            return Err(Error::unauthenticated(INVALID_CREDENTIALS));
        }

        let token = self
            .sessions
            .create(account.id)
            .await
            .map_err(map_session_store_error)?;
        info!(user = %account.id, "session opened");
        Ok(token)
    }

    async fn logout(&self, token: SessionToken) -> Result<(), Error> {
        self.sessions
            .revoke(&token)
            .await
            .map_err(map_session_store_error)
    }

    async fn profile(&self, user: UserId) -> Result<Profile, Error> {
        self.account(user).await.map(Profile::from)
    }

    async fn save_profile_image(&self, user: UserId, bytes: Vec<u8>) -> Result<(), Error> {
        if bytes.is_empty() {
            return Err(Error::validation_failed(
                "image",
                Rule::Empty.as_str(),
                "image must not be empty",
            ));
        }
        if bytes.len() > PROFILE_IMAGE_MAX_BYTES {
            return Err(Error::validation_failed(
                "image",
                Rule::TooLong.as_str(),
                format!("image must be at most {PROFILE_IMAGE_MAX_BYTES} bytes"),
            ));
        }
        self.account(user).await?;
        let images = Arc::clone(&self.images);
        run_blocking(move || images.save(user, &bytes).map_err(map_image_error)).await?;
        self.users
            .set_profile_image(user, true)
            .await
            .map_err(map_user_repository_error)
    }

    async fn profile_image(&self, user: UserId) -> Result<Vec<u8>, Error> {
        let account = self.account(user).await?;
        if !account.has_profile_image {
            return Err(Error::not_found("no profile image stored"));
        }
        let images = Arc::clone(&self.images);
        run_blocking(move || images.load(user).map_err(map_image_error))
            .await?
            .ok_or_else(|| Error::not_found("no profile image stored"))
    }

    async fn delete_profile_image(&self, user: UserId) -> Result<(), Error> {
        self.account(user).await?;
        let images = Arc::clone(&self.images);
        run_blocking(move || images.delete(user).map_err(map_image_error)).await?;
        self.users
            .set_profile_image(user, false)
            .await
            .map_err(map_user_repository_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
