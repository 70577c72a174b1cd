//! Tab-separated file backend.
//!
//! The first line is the header; each following line is one record. Cells
//! are matched to fields by header name, so a short row leaves its trailing
//! fields empty instead of shifting values into the wrong columns.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Result, SshconfError};
use crate::storage::traits::RecordStore;
use crate::storage::types::{Column, Record};

/// Record store backed by a tab-separated text file.
#[derive(Debug, Clone)]
pub struct TsvStore {
    path: PathBuf,
}

impl TsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header-only file for a new store.
    fn initialize(&self) -> Result<()> {
        crate::fs::ensure_parent_dir(&self.path)?;
        write_records(&self.path, &[])?;
        tracing::info!(path = %self.path.display(), "initialized empty store");
        Ok(())
    }
}

impl RecordStore for TsvStore {
    fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            self.initialize()?;
            return Ok(Vec::new());
        }

        let records = {
            let file = File::open(&self.path)?;
            let mut lines = BufReader::new(file).lines();

            let header = match lines.next() {
                Some(line) => line?,
                None => String::new(),
            };
            let header = header.trim_start_matches('\u{FEFF}').trim_end_matches('\r');
            if header.trim().is_empty() {
                Vec::new()
            } else {
                let columns = parse_header(header, &self.path)?;
                let mut records = Vec::new();
                for (index, line) in lines.enumerate() {
                    let line = line?;
                    let line = line.trim_end_matches('\r');
                    if line.trim().is_empty() {
                        continue;
                    }
                    // index 0 is the first data row, which is line 2 of the file
                    records.push(parse_row(line, &columns, index + 2, &self.path)?);
                }
                records
            }
        };

        if records.is_empty() && fs::metadata(&self.path)?.len() == 0 {
            self.initialize()?;
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded store");
        Ok(records)
    }

    fn persist(&self, records: &[Record]) -> Result<Option<PathBuf>> {
        for record in records {
            record.validate()?;
        }

        crate::fs::ensure_parent_dir(&self.path)?;
        let backup = crate::fs::backup_with_timestamp(&self.path, Local::now().naive_local())?;
        if let Some(ref path) = backup {
            tracing::info!(backup = %path.display(), "backed up store");
        }

        write_records(&self.path, records)?;
        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            "persisted store"
        );
        Ok(backup)
    }

    fn backups(&self) -> Result<Vec<PathBuf>> {
        Ok(crate::fs::list_backups(&self.path)?)
    }

    fn clean_backups(&self) -> Result<usize> {
        let backups = self.backups()?;
        for path in &backups {
            fs::remove_file(path)?;
            tracing::debug!(backup = %path.display(), "removed backup");
        }
        tracing::info!(count = backups.len(), "cleaned backups");
        Ok(backups.len())
    }
}

/// Serialize records to the tab-separated layout (header included).
pub fn serialize_records(records: &[Record]) -> String {
    let mut out = Column::header_line();
    out.push('\n');
    for record in records {
        out.push_str(&record.to_row().join("\t"));
        out.push('\n');
    }
    out
}

fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(serialize_records(records).as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn parse_header(line: &str, path: &Path) -> Result<Vec<Option<Column>>> {
    let columns: Vec<Option<Column>> = line
        .split('\t')
        .map(|cell| Column::from_header(cell.trim()))
        .collect();
    if columns.iter().all(Option::is_none) {
        return Err(SshconfError::Storage(format!(
            "{} has no recognizable header (expected: {})",
            path.display(),
            Column::header_line().replace('\t', ", ")
        )));
    }
    for (cell, column) in line.split('\t').zip(&columns) {
        if column.is_none() {
            tracing::warn!(column = cell, "ignoring unknown store column");
        }
    }
    Ok(columns)
}

fn parse_row(
    line: &str,
    columns: &[Option<Column>],
    line_number: usize,
    path: &Path,
) -> Result<Record> {
    let cells: Vec<&str> = line.split('\t').collect();
    // a stray CR would load fine but fail validation on every later write
    let broken = columns
        .iter()
        .zip(&cells)
        .find_map(|(column, cell)| column.filter(|_| cell.contains('\r')));
    if let Some(column) = broken {
        return Err(SshconfError::Storage(format!(
            "{} line {}: {} contains a carriage return",
            path.display(),
            line_number,
            column
        )));
    }
    if cells.len() > columns.len() {
        tracing::warn!(
            line = line_number,
            extra = cells.len() - columns.len(),
            "ignoring extra cells"
        );
    }
    Ok(Record::from_cells(
        columns
            .iter()
            .zip(cells)
            .filter_map(|(column, value)| column.map(|c| (c, value))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn header() -> String {
        Column::header_line()
    }

    #[test]
    fn test_load_missing_file_initializes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("hosts.tsv");
        let store = TsvStore::new(&path);

        let records = store.load().unwrap();

        assert!(records.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", header()));
    }

    #[test]
    fn test_load_empty_file_initializes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(&path, "").unwrap();

        let records = TsvStore::new(&path).load().unwrap();

        assert!(records.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", header()));
    }

    #[test]
    fn test_load_maps_cells_by_header_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(
            &path,
            "Host\tHostName\tEnabled\tUser\nweb1\t10.0.0.1\t1\tdeploy\n",
        )
        .unwrap();

        let records = TsvStore::new(&path).load().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].host, "web1");
        assert_eq!(records[0].host_name, "10.0.0.1");
        assert_eq!(records[0].enabled, "1");
        assert_eq!(records[0].user, "deploy");
        assert_eq!(records[0].port, "22");
        assert_eq!(records[0].password, "");
    }

    #[test]
    fn test_short_row_leaves_trailing_fields_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(&path, format!("{}\n1\tWeb\tweb1\n", header())).unwrap();

        let records = TsvStore::new(&path).load().unwrap();

        assert_eq!(records[0].host, "web1");
        assert_eq!(records[0].host_name, "");
        assert_eq!(records[0].desc, "");
        assert_eq!(records[0].port, "22");
    }

    #[test]
    fn test_long_row_ignores_extra_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(
            &path,
            format!("{}\n1\tn\th\thn\t22\tu\tp\td\textra\n", header()),
        )
        .unwrap();

        let records = TsvStore::new(&path).load().unwrap();

        assert_eq!(records[0].desc, "d");
    }

    #[test]
    fn test_unrecognized_header_is_error_and_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(&path, "web1\t10.0.0.1\n").unwrap();

        let result = TsvStore::new(&path).load();

        assert!(matches!(result, Err(SshconfError::Storage(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "web1\t10.0.0.1\n");
    }

    #[test]
    fn test_persist_writes_canonical_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        let store = TsvStore::new(&path);
        let records = vec![
            Record::new("web1", "10.0.0.1").with_user("root"),
            Record::new("db1", "10.0.0.2").with_enabled(false),
        ];

        store.persist(&records).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            serialize_records(&records)
        );
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_persist_creates_one_backup_per_call() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        let store = TsvStore::new(&path);
        store.load().unwrap();

        let first = store.persist(&[Record::new("a", "1")]).unwrap();
        let second = store.persist(&[Record::new("b", "2")]).unwrap();

        assert!(first.is_some());
        assert!(second.is_some());
        let backups = store.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(
            fs::read_to_string(second.unwrap()).unwrap(),
            serialize_records(&[Record::new("a", "1")])
        );
    }

    #[test]
    fn test_persist_rejects_tabs_without_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        let store = TsvStore::new(&path);
        store.load().unwrap();

        let result = store.persist(&[Record::new("a", "1").with_desc("x\ty")]);

        assert!(matches!(result, Err(SshconfError::InvalidInput(_))));
        assert!(store.backups().unwrap().is_empty());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_clean_backups_keeps_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        let store = TsvStore::new(&path);
        store.load().unwrap();
        store.persist(&[Record::new("a", "1")]).unwrap();
        store.persist(&[Record::new("b", "2")]).unwrap();

        assert_eq!(store.clean_backups().unwrap(), 2);
        assert!(store.backups().unwrap().is_empty());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_crlf_lines_are_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(&path, format!("{}\r\n1\t\tweb1\t1.2.3.4\t2222\t\t\t\r\n", header())).unwrap();

        let records = TsvStore::new(&path).load().unwrap();

        assert_eq!(records[0].port, "2222");
        assert_eq!(records[0].desc, "");
    }

    #[test]
    fn test_byte_order_mark_header_keeps_enabled_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(
            &path,
            format!("\u{FEFF}{}\n1\tn\tweb1\t10.0.0.1\t22\troot\t\t\n", header()),
        )
        .unwrap();
        let store = TsvStore::new(&path);

        let records = store.load().unwrap();
        assert_eq!(records[0].enabled, "1");

        store.persist(&records).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Enabled\t"));
        assert_eq!(store.load().unwrap()[0].enabled, "1");
    }

    #[test]
    fn test_header_cells_are_trimmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(&path, "Enabled \t Host\n0\tweb1\n").unwrap();

        let records = TsvStore::new(&path).load().unwrap();

        assert_eq!(records[0].enabled, "0");
        assert_eq!(records[0].host, "web1");
    }

    #[test]
    fn test_carriage_return_inside_cell_names_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        fs::write(
            &path,
            format!("{}\n1\tok\tdb1\n1\ta\rb\tweb1\t10.0.0.1\n", header()),
        )
        .unwrap();

        let err = TsvStore::new(&path).load().unwrap_err();

        assert!(matches!(err, SshconfError::Storage(_)));
        let message = err.to_string();
        assert!(message.contains("line 3"), "{}", message);
        assert!(message.contains("Name"), "{}", message);
    }
}
