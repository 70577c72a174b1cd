//! CLI error types for structured error handling.
//!
//! Handlers return `anyhow::Result`; [`classify`] recovers the exit code and
//! a hint from whatever ended up in the error chain.

use std::fmt;

use sshconf_core::SshconfError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Authentication failed (no master password supplied or set)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::AuthFailed { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            CliError::AuthFailed { hint, .. } => hint.clone(),
            CliError::InvalidInput(_) => None,
        }
    }
}

/// Exit code and optional hint for an error returned by a handler.
pub fn classify(err: &anyhow::Error) -> (i32, Option<String>) {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return (cli.exit_code(), cli.hint());
    }
    if let Some(core) = err.downcast_ref::<SshconfError>() {
        return (core_exit_code(core), core_hint(core));
    }
    (exit_codes::FAILURE, None)
}

fn core_exit_code(err: &SshconfError) -> i32 {
    match err {
        SshconfError::NoMasterPassword
        | SshconfError::IncorrectPassword
        | SshconfError::Locked => exit_codes::AUTH_FAILED,
        SshconfError::NotFound(_) => exit_codes::NOT_FOUND,
        SshconfError::Ambiguous { .. }
        | SshconfError::UnknownColumn(_)
        | SshconfError::InvalidInput(_)
        | SshconfError::AlreadyInitialized => exit_codes::INVALID_INPUT,
        SshconfError::Crypto(_) | SshconfError::Storage(_) | SshconfError::Io { .. } => {
            exit_codes::FAILURE
        }
    }
}

fn core_hint(err: &SshconfError) -> Option<String> {
    let hint = match err {
        SshconfError::NoMasterPassword => "Run `sshconf init` to set a master password.",
        SshconfError::IncorrectPassword | SshconfError::Locked => {
            "Pass it with -p or set SSHCONFIG_PASSWORD."
        }
        SshconfError::NotFound(_) => "Run `sshconf list` to see the stored hosts.",
        SshconfError::Ambiguous { .. } => {
            "Fix the duplicates with `sshconf open` before removing."
        }
        SshconfError::UnknownColumn(_) => {
            "Columns are Enabled, Name, Host, HostName, Port, User, Password, Desc."
        }
        SshconfError::AlreadyInitialized => "Use `sshconf passwd NEW` to change it.",
        _ => return None,
    };
    Some(hint.to_string())
}
