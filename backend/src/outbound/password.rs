//! Argon2id implementation of the `PasswordHasher` port.

use argon2::Argon2;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordDigest};

/// Digests passwords as PHC strings with Argon2id default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn digest(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_ref())
            .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
        match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}
