//! Filesystem locations used by an inventory.

use std::path::{Path, PathBuf};

/// File name of the master password digest, kept next to the store.
pub const PASSWORD_FILE_NAME: &str = "password";

/// Every path an [`Inventory`](crate::Inventory) reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Tab-separated host table
    pub store: PathBuf,
    /// Master password digest
    pub password_file: PathBuf,
    /// Rendered SSH client configuration
    pub ssh_config: PathBuf,
}

impl StorePaths {
    /// Paths for `store`, with the password file as its sibling.
    pub fn new(store: impl Into<PathBuf>, ssh_config: impl Into<PathBuf>) -> Self {
        let store = store.into();
        let password_file = sibling(&store, PASSWORD_FILE_NAME);
        Self {
            store,
            password_file,
            ssh_config: ssh_config.into(),
        }
    }
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
