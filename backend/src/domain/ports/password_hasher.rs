//! Port for one-way password digests.

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Digest could not be produced.
        Hash { message: String } => "password hashing failed: {message}",
        /// Stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Salted, one-way transform of cleartext passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest `password` with a fresh random salt.
    fn digest(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;

    /// Whether `password` matches `digest`.
    fn verify(&self, password: &Password, digest: &PasswordDigest)
    -> Result<bool, PasswordHashError>;
}
