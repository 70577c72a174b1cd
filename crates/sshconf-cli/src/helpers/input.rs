//! Interactive prompts for master passwords and new hosts.

use dialoguer::{Input, Password};
use secrecy::SecretString;

use sshconf_core::crypto::validate_new_password;
use sshconf_core::storage::{DEFAULT_PORT, DEFAULT_USER};
use sshconf_core::Record;

/// Prompt for the master password.
pub fn prompt_master_password() -> anyhow::Result<SecretString> {
    let value = Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))?;
    Ok(SecretString::from(value))
}

/// Prompt for a new master password with confirmation.
pub fn prompt_new_master_password() -> anyhow::Result<SecretString> {
    loop {
        let value = Password::new()
            .with_prompt("New master password")
            .with_confirmation("Confirm master password", "Passwords do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))?;
        if let Err(err) = validate_new_password(&value) {
            eprintln!("{}", err);
            continue;
        }
        return Ok(SecretString::from(value));
    }
}

/// Values for a new host, as far as they were given on the command line.
#[derive(Debug, Default, Clone)]
pub struct RecordDraft {
    pub host: Option<String>,
    pub host_name: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub enabled: Option<bool>,
}

impl RecordDraft {
    /// Build the record without prompting. Host and HostName are required.
    pub fn into_record(self) -> anyhow::Result<Record> {
        let host = required(self.host, "HOST")?;
        let host_name = required(self.host_name, "HOSTNAME")?;
        Ok(Record::new(host, host_name)
            .with_port(non_empty_or(self.port, DEFAULT_PORT))
            .with_user(non_empty_or(self.user, DEFAULT_USER))
            .with_password(self.password.unwrap_or_default())
            .with_name(self.name.unwrap_or_default())
            .with_desc(self.desc.unwrap_or_default())
            .with_enabled(self.enabled.unwrap_or(true)))
    }
}

/// Ask for every value the draft is missing, then build the record.
pub fn prompt_record(mut draft: RecordDraft) -> anyhow::Result<Record> {
    if draft.host.is_none() {
        draft.host = Some(ask("Host key", None)?);
    }
    if draft.host_name.is_none() {
        draft.host_name = Some(ask("Host address", None)?);
    }
    if draft.port.is_none() {
        draft.port = Some(ask("Port", Some(DEFAULT_PORT))?);
    }
    if draft.user.is_none() {
        draft.user = Some(ask("User", Some(DEFAULT_USER))?);
    }
    if draft.password.is_none() {
        let value = Password::new()
            .with_prompt("Password (optional)")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
        draft.password = Some(value);
    }
    if draft.name.is_none() {
        draft.name = Some(ask_optional("Name (optional)")?);
    }
    if draft.desc.is_none() {
        draft.desc = Some(ask_optional("Description (optional)")?);
    }
    while draft.enabled.is_none() {
        let answer = ask("Enabled (0/1)", Some("1"))?;
        match parse_enabled(&answer) {
            Some(enabled) => draft.enabled = Some(enabled),
            None => eprintln!("Enter 1 to enable the host or 0 to disable it"),
        }
    }
    draft.into_record()
}

fn ask(prompt: &str, default: Option<&str>) -> anyhow::Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    let value = input
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", prompt, e))?;
    Ok(value.trim().to_string())
}

fn ask_optional(prompt: &str) -> anyhow::Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", prompt, e))?;
    Ok(value.trim().to_string())
}

/// Read an enabled answer: `1` or `0`, empty meaning enabled.
fn parse_enabled(answer: &str) -> Option<bool> {
    match answer.trim() {
        "" | "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn required(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(crate::errors::CliError::invalid_input(format!("{} is required", label)).into()),
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}
