use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_ENV;

/// Optional settings file. Every section and key may be left out.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SshconfConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub ssh: SshSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SshSection {
    pub config_path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub editor: Option<String>,
}

/// Config file location: `$SSHCONF_CONFIG`, else the XDG config dir.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?
        .join(".config")
        .join("ssh-config")
        .join("ssh-config.tsv"))
}

pub fn default_ssh_config_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join(".ssh").join("config"))
}

/// Read the config file, or defaults when it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<SshconfConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(SshconfConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<SshconfConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sshconf"));
        }
    }
    Ok(home_dir()?.join(".config").join("sshconf"))
}

/// Expand a leading `~/` against `$HOME`.
pub fn expand_home(value: &str) -> anyhow::Result<PathBuf> {
    if value == "~" {
        return home_dir();
    }
    match value.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(value)),
    }
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parses() {
        let config: SshconfConfig = toml::from_str("").unwrap();
        assert!(config.store.path.is_none());
        assert!(config.ssh.config_path.is_none());
        assert!(config.ui.editor.is_none());
    }

    #[test]
    fn test_partial_config_parses() {
        let config: SshconfConfig =
            toml::from_str("[ui]\neditor = \"hx\"\n\n[store]\npath = \"/tmp/hosts.tsv\"\n").unwrap();
        assert_eq!(config.ui.editor.as_deref(), Some("hx"));
        assert_eq!(config.store.path.as_deref(), Some("/tmp/hosts.tsv"));
        assert!(config.ssh.config_path.is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(toml::from_str::<SshconfConfig>("[store]\npath = 3\n").is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.toml")).unwrap();
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_expand_plain_path() {
        assert_eq!(
            expand_home("/etc/ssh/config").unwrap(),
            PathBuf::from("/etc/ssh/config")
        );
    }
}
