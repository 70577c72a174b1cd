//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// No host matches the given key.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, unknown column or ambiguous key.
    pub const INVALID_INPUT: i32 = 4;

    /// Master password missing or wrong.
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SSHCONF_LOG";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SSHCONF_CONFIG";

/// Editors tried in order when none is configured.
pub const FALLBACK_EDITORS: [&str; 4] = ["code", "nano", "vim", "vi"];
