//! Error types for sshconf core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing hints.

use thiserror::Error;

/// Result type alias for sshconf operations.
pub type Result<T> = std::result::Result<T, SshconfError>;

/// Core error type for sshconf operations.
#[derive(Debug, Error)]
pub enum SshconfError {
    /// No master password digest has been stored yet
    #[error("No master password set")]
    NoMasterPassword,

    /// Candidate master password did not match the stored digest
    #[error("Master password validation failed")]
    IncorrectPassword,

    /// A master password already exists and cannot be initialized again
    #[error("A master password is already set")]
    AlreadyInitialized,

    /// A sensitive operation was attempted without unlocking the inventory
    #[error("Master password required for this operation")]
    Locked,

    /// Encryption or decryption error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Store file could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// No host matched the given key
    #[error("No host matches key \"{0}\"")]
    NotFound(String),

    /// More than one host matched a key that must be unique
    #[error("Key \"{key}\" matches several hosts: {}", .hosts.join(", "))]
    Ambiguous { key: String, hosts: Vec<String> },

    /// Column name outside the fixed header
    #[error("Unknown column \"{0}\"")]
    UnknownColumn(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SshconfError {
    /// Whether this error means the master password gate refused access.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            SshconfError::NoMasterPassword | SshconfError::IncorrectPassword | SshconfError::Locked
        )
    }
}
