//! Opening files in an external editor.

use std::path::Path;
use std::process::Command;

use crate::constants::FALLBACK_EDITORS;

/// Editors to try, in order: configured, `$VISUAL`, `$EDITOR`, then the
/// built-in fallbacks.
pub fn editor_candidates(configured: Option<&str>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    let from_env = ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|name| std::env::var(name).ok());
    for value in configured.map(str::to_string).into_iter().chain(from_env) {
        let value = value.trim().to_string();
        if !value.is_empty() && !candidates.contains(&value) {
            candidates.push(value);
        }
    }
    for fallback in FALLBACK_EDITORS {
        if !candidates.iter().any(|c| c == fallback) {
            candidates.push(fallback.to_string());
        }
    }
    candidates
}

/// Open `path` with the first editor that exits successfully.
///
/// Returns the editor used.
pub fn open_in_editor(path: &Path, configured: Option<&str>) -> anyhow::Result<String> {
    for candidate in editor_candidates(configured) {
        let mut parts = candidate.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };
        let status = Command::new(program).args(parts).arg(path).status();
        match status {
            Ok(status) if status.success() => return Ok(candidate),
            Ok(status) => {
                tracing::debug!(editor = %candidate, %status, "editor exited with failure");
            }
            Err(e) => {
                tracing::debug!(editor = %candidate, error = %e, "failed to launch editor");
            }
        }
    }
    Err(anyhow::anyhow!(
        "No editor could open {}; set $EDITOR or ui.editor in the config",
        path.display()
    ))
}
