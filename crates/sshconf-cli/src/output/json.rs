//! JSON output formatting for hosts.

use sshconf_core::Record;

/// Serialize records as a JSON array using the store's column names.
pub fn records_json(records: &[Record]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
