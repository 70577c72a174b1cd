//! Storage abstraction for the host inventory.
//!
//! This module defines the `RecordStore` trait, the record model, and the
//! tab-separated file backend.
//!
//! ## File format
//!
//! - UTF-8 text, one header line then one line per record
//! - cells separated by a single tab; no quoting or escaping
//! - every write is preceded by a timestamped backup of the previous file

pub mod traits;
pub mod tsv;
pub mod types;

// Re-export public types
pub use traits::RecordStore;
pub use tsv::{serialize_records, TsvStore};
pub use types::{filter_records, Column, Record, DEFAULT_PORT, DEFAULT_USER};
