//! Port for profile image files.

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile image store adapters.
    pub enum ProfileImageStoreError {
        /// Filesystem operation failed.
        Io { message: String } => "profile image store failed: {message}",
    }
}

/// One image per account, keyed by user id.
#[cfg_attr(test, mockall::automock)]
pub trait ProfileImageStore: Send + Sync {
    /// Write or replace the image for `user`.
    fn save(&self, user: UserId, bytes: &[u8]) -> Result<(), ProfileImageStoreError>;

    /// Read the image for `user`, if one exists.
    fn load(&self, user: UserId) -> Result<Option<Vec<u8>>, ProfileImageStoreError>;

    /// Remove the image for `user`. Missing files are not an error.
    fn delete(&self, user: UserId) -> Result<(), ProfileImageStoreError>;
}
