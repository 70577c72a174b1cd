//! Application context for the sshconf CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::io::IsTerminal;

use once_cell::unsync::OnceCell;
use secrecy::{ExposeSecret, SecretString};

use sshconf_core::{Inventory, SshconfError, StorePaths};

use crate::cli::Cli;
use crate::config::{load_config, resolve_config_path, SshconfConfig};
use crate::errors::CliError;
use crate::helpers::prompt_master_password;
use crate::ui::UiContext;

use super::resolver::{resolve_paths, supplied_password};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<SshconfConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily if needed.
    pub fn config(&self) -> anyhow::Result<&SshconfConfig> {
        self.config
            .get_or_try_init(|| load_config(&resolve_config_path()?))
    }

    /// Get the configured editor override, if any.
    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.ui.editor.as_deref())
    }

    pub fn paths(&self) -> anyhow::Result<StorePaths> {
        resolve_paths(self.cli, self.config()?)
    }

    /// Build a UI context from the global flags.
    pub fn ui_context(&self, json_flag: bool) -> UiContext {
        UiContext::from_env(json_flag, self.cli.no_color)
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self, no_input: bool) -> bool {
        !no_input && std::io::stdin().is_terminal()
    }

    /// Open the inventory for reading.
    ///
    /// A supplied master password is checked and unlocks the inventory; a
    /// wrong one fails the run. Without one the inventory stays locked.
    pub fn open_for_read(&self) -> anyhow::Result<Inventory> {
        let mut inventory = Inventory::open(self.paths()?);
        if let Some(password) = supplied_password(self.cli) {
            inventory.unlock(password.expose_secret())?;
        }
        Ok(inventory)
    }

    /// Master password from the flag or env var, or a prompt when allowed.
    pub fn master_password(&self, no_input: bool) -> anyhow::Result<SecretString> {
        match supplied_password(self.cli) {
            Some(password) => Ok(password),
            None if self.interactive(no_input) => prompt_master_password(),
            None => Err(CliError::auth_failed_with_hint(
                "Master password required for this operation",
                "Pass it with -p or set SSHCONFIG_PASSWORD.",
            )
            .into()),
        }
    }

    /// Open the inventory and unlock it, prompting when allowed.
    pub fn open_unlocked(&self, no_input: bool) -> anyhow::Result<Inventory> {
        let mut inventory = Inventory::open(self.paths()?);
        if !inventory.gate().is_initialized()? {
            return Err(SshconfError::NoMasterPassword.into());
        }
        let password = self.master_password(no_input)?;
        inventory.unlock(password.expose_secret())?;
        Ok(inventory)
    }
}
