//! Filesystem `ProfileImageStore` confined to one directory with `cap-std`.
//!
//! Each account owns a single file named after its numeric id. Writes land in
//! a staging file first and are renamed into place, so readers never observe a
//! partial image.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use crate::domain::UserId;
use crate::domain::ports::{ProfileImageStore, ProfileImageStoreError};

/// Profile images stored under a single directory.
#[derive(Debug)]
pub struct CapStdProfileImageStore {
    root: PathBuf,
    dir: Dir,
}

impl CapStdProfileImageStore {
    /// Open `root`, creating it when missing.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ProfileImageStoreError> {
        let root = root.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&root, ambient_authority())
            .map_err(|err| io_error(&root, &err))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .map_err(|err| io_error(&root, &err))?;
        Ok(Self { root, dir })
    }

    /// Directory holding the images.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_name(user: UserId) -> String {
        user.get().to_string()
    }
}

fn io_error(path: &Path, error: &io::Error) -> ProfileImageStoreError {
    ProfileImageStoreError::io(format!("{}: {error}", path.display()))
}

impl ProfileImageStore for CapStdProfileImageStore {
    fn save(&self, user: UserId, bytes: &[u8]) -> Result<(), ProfileImageStoreError> {
        let name = Self::file_name(user);
        let staging = format!("{name}.partial");
        self.dir
            .write(&staging, bytes)
            .map_err(|err| io_error(&self.root.join(&staging), &err))?;
        self.dir
            .rename(&staging, &self.dir, &name)
            .map_err(|err| io_error(&self.root.join(&name), &err))?;
        debug!(user = %user, bytes = bytes.len(), "profile image stored");
        Ok(())
    }

    fn load(&self, user: UserId) -> Result<Option<Vec<u8>>, ProfileImageStoreError> {
        let name = Self::file_name(user);
        match self.dir.read(&name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&self.root.join(&name), &err)),
        }
    }

    fn delete(&self, user: UserId) -> Result<(), ProfileImageStoreError> {
        let name = Self::file_name(user);
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.root.join(&name), &err)),
        }
    }
}
