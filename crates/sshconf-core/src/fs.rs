//! Filesystem utilities for timestamped backups and private files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Timestamp layout appended to backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const TIMESTAMP_LEN: usize = 14;

/// Copy `source` to `<source>.<timestamp>`, returning the backup path.
///
/// When a backup for the same second already exists a numeric suffix
/// (`.1`, `.2`, ...) is appended so earlier backups are never overwritten.
/// Returns `Ok(None)` when `source` does not exist.
pub fn backup_with_timestamp(source: &Path, now: NaiveDateTime) -> io::Result<Option<PathBuf>> {
    if !source.exists() {
        return Ok(None);
    }

    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let base = suffixed(source, &stamp);
    let mut candidate = base.clone();
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = suffixed(&base, &counter.to_string());
        counter += 1;
    }

    fs::copy(source, &candidate).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!(
                "Backup copy {} -> {} failed: {}",
                source.display(),
                candidate.display(),
                e
            ),
        )
    })?;
    Ok(Some(candidate))
}

/// List backups of `source` created by [`backup_with_timestamp`], oldest first.
pub fn list_backups(source: &Path) -> io::Result<Vec<PathBuf>> {
    let Some(file_name) = source.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let parent = match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}.", file_name);
    let mut backups = Vec::new();
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(suffix) = name.strip_prefix(&prefix) {
            if is_backup_suffix(suffix) && entry.file_type()?.is_file() {
                backups.push(entry.path());
            }
        }
    }
    // Timestamps are fixed-width so lexical order is chronological; the
    // collision counter only needs a numeric tiebreak.
    backups.sort_by_key(|path| sort_key(path));
    Ok(backups)
}

/// Restrict a file to its owner (no-op on non-Unix platforms).
pub fn set_private_permissions(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".");
    os.push(suffix);
    PathBuf::from(os)
}

fn is_backup_suffix(suffix: &str) -> bool {
    let (stamp, counter) = match suffix.split_once('.') {
        Some((stamp, counter)) => (stamp, Some(counter)),
        None => (suffix, None),
    };
    let stamp_ok = stamp.len() == TIMESTAMP_LEN && stamp.bytes().all(|b| b.is_ascii_digit());
    let counter_ok = counter
        .map(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(true);
    stamp_ok && counter_ok
}

fn sort_key(path: &Path) -> (String, u32) {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    // name is "<file>.<stamp>[.<n>]"; the stamp always has TIMESTAMP_LEN digits
    let mut parts = name.rsplitn(2, '.');
    let last = parts.next().unwrap_or_default();
    if last.len() == TIMESTAMP_LEN {
        (last.to_string(), 0)
    } else {
        let rest = parts.next().unwrap_or_default();
        let stamp = rest.rsplit('.').next().unwrap_or_default();
        (stamp.to_string(), last.parse().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_backup_missing_source_is_none() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("hosts.tsv");
        assert!(backup_with_timestamp(&source, at(1, 2, 3)).unwrap().is_none());
    }

    #[test]
    fn test_backup_name_uses_timestamp() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("hosts.tsv");
        File::create(&source).unwrap().write_all(b"old").unwrap();

        let backup = backup_with_timestamp(&source, at(13, 5, 7)).unwrap().unwrap();

        assert_eq!(backup, dir.path().join("hosts.tsv.20240309130507"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "old");
    }

    #[test]
    fn test_backup_same_second_gets_counter() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("hosts.tsv");
        File::create(&source).unwrap().write_all(b"v1").unwrap();

        let first = backup_with_timestamp(&source, at(1, 1, 1)).unwrap().unwrap();
        let second = backup_with_timestamp(&source, at(1, 1, 1)).unwrap().unwrap();
        let third = backup_with_timestamp(&source, at(1, 1, 1)).unwrap().unwrap();

        assert_ne!(first, second);
        assert_eq!(second, dir.path().join("hosts.tsv.20240309010101.1"));
        assert_eq!(third, dir.path().join("hosts.tsv.20240309010101.2"));
        assert_eq!(list_backups(&source).unwrap(), vec![first, second, third]);
    }

    #[test]
    fn test_list_backups_ignores_other_files() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("hosts.tsv");
        File::create(&source).unwrap();
        File::create(dir.path().join("hosts.tsv.bak")).unwrap();
        File::create(dir.path().join("hosts.tsv.2024")).unwrap();
        File::create(dir.path().join("password")).unwrap();
        File::create(dir.path().join("hosts.tsv.20240101000000")).unwrap();

        let backups = list_backups(&source).unwrap();
        assert_eq!(backups, vec![dir.path().join("hosts.tsv.20240101000000")]);
    }

    #[test]
    fn test_list_backups_sorted_oldest_first() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("hosts.tsv");
        File::create(dir.path().join("hosts.tsv.20240102000000")).unwrap();
        File::create(dir.path().join("hosts.tsv.20240101000000.10")).unwrap();
        File::create(dir.path().join("hosts.tsv.20240101000000.2")).unwrap();
        File::create(dir.path().join("hosts.tsv.20240101000000")).unwrap();

        let names: Vec<String> = list_backups(&source)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "hosts.tsv.20240101000000",
                "hosts.tsv.20240101000000.2",
                "hosts.tsv.20240101000000.10",
                "hosts.tsv.20240102000000",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_private_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join("secret");
        File::create(&path).unwrap();
        set_private_permissions(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
