//! Application-level utilities for the sshconf CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path and master password resolution

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::supplied_password;
