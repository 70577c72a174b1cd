//! Path and master password resolution.

use secrecy::SecretString;

use sshconf_core::StorePaths;

use crate::cli::Cli;
use crate::config::{default_ssh_config_path, default_store_path, expand_home, SshconfConfig};

/// Resolve the files to work on: flag or env var, then config, then default.
pub fn resolve_paths(cli: &Cli, config: &SshconfConfig) -> anyhow::Result<StorePaths> {
    let store = match (&cli.file, &config.store.path) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => expand_home(path)?,
        (None, None) => default_store_path()?,
    };
    let ssh_config = match (&cli.ssh_config, &config.ssh.config_path) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => expand_home(path)?,
        (None, None) => default_ssh_config_path()?,
    };
    tracing::debug!(
        store = %store.display(),
        ssh_config = %ssh_config.display(),
        "resolved paths"
    );
    Ok(StorePaths::new(store, ssh_config))
}

/// Master password from `--password` or `SSHCONFIG_PASSWORD`.
///
/// clap already gives the flag precedence over the variable. An empty value
/// counts as not supplied.
pub fn supplied_password(cli: &Cli) -> Option<SecretString> {
    cli.password
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(|value| SecretString::from(value.to_string()))
}
