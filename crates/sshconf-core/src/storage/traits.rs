//! Record store trait definition.
//!
//! The `RecordStore` trait is the seam between inventory operations and the
//! file format, so operations can be exercised against any backend.

use std::path::PathBuf;

use super::types::Record;
use crate::error::Result;

/// Persistent, ordered collection of host records.
///
/// Implementations must ensure:
/// - `load` returns records in the order they were persisted
/// - every `persist` keeps a backup of the previous contents
/// - the sensitive column is stored exactly as given (encryption is the
///   caller's job)
pub trait RecordStore {
    /// Load all records.
    ///
    /// A store that does not exist yet is initialized empty.
    ///
    /// # Errors
    ///
    /// Returns `SshconfError::Storage` if the backing data is unreadable or
    /// has no recognizable header.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replace the stored records with `records`.
    ///
    /// # Returns
    ///
    /// The backup written for the previous contents, if there were any.
    ///
    /// # Errors
    ///
    /// Returns `SshconfError::InvalidInput` if a value cannot be represented,
    /// or `SshconfError::Io` if writing fails.
    fn persist(&self, records: &[Record]) -> Result<Option<PathBuf>>;

    /// Backups written by `persist`, oldest first.
    fn backups(&self) -> Result<Vec<PathBuf>>;

    /// Delete every backup, returning how many were removed.
    fn clean_backups(&self) -> Result<usize>;
}
