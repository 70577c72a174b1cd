//! SSH client configuration rendering.

use crate::storage::{Record, DEFAULT_PORT};

const INDENT: &str = "    ";

/// Render records as `~/.ssh/config` host blocks.
///
/// Disabled records keep their block with every line commented out. The
/// `Port` line is dropped for the default port, and `HostName`/`User` lines
/// are dropped when empty.
pub fn render_ssh_config(records: &[Record]) -> String {
    let blocks: Vec<String> = records.iter().map(render_block).collect();
    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_block(record: &Record) -> String {
    let prefix = if record.is_enabled() { "" } else { "# " };
    let mut lines = vec![format!("{}Host {}", prefix, record.host)];

    if !record.host_name.is_empty() {
        lines.push(format!("{}{}HostName {}", INDENT, prefix, record.host_name));
    }
    let port = record.port.trim();
    if !port.is_empty() && port != DEFAULT_PORT {
        lines.push(format!("{}{}Port {}", INDENT, prefix, port));
    }
    if !record.user.is_empty() {
        lines.push(format!("{}{}User {}", INDENT, prefix, record.user));
    }

    lines.join("\n")
}
