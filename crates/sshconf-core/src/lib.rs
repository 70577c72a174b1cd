//! # sshconf core
//!
//! Core library for sshconf, a small inventory of SSH hosts kept in a
//! tab-separated file and rendered into an OpenSSH client configuration.
//!
//! This crate holds the domain logic, storage and cryptography, independent
//! of the CLI.
//!
//! ## Architecture
//!
//! - **storage**: the record model and the tab-separated store
//! - **crypto**: master password gate and the `Password` column cipher
//! - **inventory**: list/add/remove/update and password rotation
//! - **render**: `~/.ssh/config` generation
//! - **paths**: the set of files an inventory works on
//! - **fs**: backups and file permission helpers

pub mod crypto;
pub mod error;
pub mod fs;
pub mod inventory;
pub mod paths;
pub mod render;
pub mod storage;

pub use error::{Result, SshconfError};
pub use inventory::{Inventory, LOCKED_PLACEHOLDER};
pub use paths::StorePaths;
pub use render::render_ssh_config;
pub use storage::{Column, Record, RecordStore, TsvStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
