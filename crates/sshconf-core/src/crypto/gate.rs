//! Master password gate.
//!
//! A single unsalted SHA-256 digest, stored as hex in a small text file,
//! decides whether any sensitive operation may proceed.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{Result, SshconfError};

/// Hash a master password to its stored form.
///
/// Returns lowercase hex SHA-256. Empty input passes through unchanged and
/// means "no password".
pub fn hash_password(password: &str) -> String {
    if password.is_empty() {
        return String::new();
    }
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a new master password before it is stored.
///
/// An empty digest would let the empty password through the gate, so blank
/// passwords are refused.
pub fn validate_new_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(SshconfError::InvalidInput(
            "Master password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Gate backed by the master password file.
#[derive(Debug, Clone)]
pub struct PasswordGate {
    path: PathBuf,
}

impl PasswordGate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored digest, or `None` when no master password has been set.
    pub fn stored_digest(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(contents.trim().to_string()))
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.stored_digest()?.is_some())
    }

    /// Validate a candidate master password.
    ///
    /// # Errors
    ///
    /// - `SshconfError::NoMasterPassword` if no digest is stored
    /// - `SshconfError::IncorrectPassword` if the digest does not match
    pub fn validate(&self, candidate: &str) -> Result<()> {
        let stored = self
            .stored_digest()?
            .ok_or(SshconfError::NoMasterPassword)?;
        if stored != hash_password(candidate) {
            tracing::warn!(path = %self.path.display(), "master password validation failed");
            return Err(SshconfError::IncorrectPassword);
        }
        tracing::debug!("master password validated");
        Ok(())
    }

    /// Replace the stored digest after validating `old`.
    ///
    /// Encrypted fields are not touched; re-encrypting them is the caller's job.
    pub fn set_password(&self, new: &str, old: &str) -> Result<()> {
        self.validate(old)?;
        validate_new_password(new)?;
        self.write_digest(&hash_password(new))?;
        tracing::info!(path = %self.path.display(), "master password changed");
        Ok(())
    }

    /// Store the first master password.
    ///
    /// # Errors
    ///
    /// Returns `SshconfError::AlreadyInitialized` if a digest already exists.
    pub fn initialize(&self, new: &str) -> Result<()> {
        if self.is_initialized()? {
            return Err(SshconfError::AlreadyInitialized);
        }
        validate_new_password(new)?;
        self.write_digest(&hash_password(new))?;
        tracing::info!(path = %self.path.display(), "master password initialized");
        Ok(())
    }

    fn write_digest(&self, digest: &str) -> Result<()> {
        crate::fs::ensure_parent_dir(&self.path)?;
        fs::write(&self.path, digest)?;
        crate::fs::set_private_permissions(&self.path)?;
        Ok(())
    }
}
