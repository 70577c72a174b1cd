//! Core data types for the host inventory.
//!
//! A [`Record`] is one host entry with a fixed set of named fields. The
//! on-disk column order is given by [`Column::ALL`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SshconfError};

/// Port assumed when a record leaves the field empty.
pub const DEFAULT_PORT: &str = "22";

/// User offered when adding a host interactively.
pub const DEFAULT_USER: &str = "root";

/// One column of the store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Enabled,
    Name,
    Host,
    HostName,
    Port,
    User,
    Password,
    Desc,
}

impl Column {
    /// All columns in header order.
    pub const ALL: [Column; 8] = [
        Column::Enabled,
        Column::Name,
        Column::Host,
        Column::HostName,
        Column::Port,
        Column::User,
        Column::Password,
        Column::Desc,
    ];

    /// Header text for this column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Enabled => "Enabled",
            Column::Name => "Name",
            Column::Host => "Host",
            Column::HostName => "HostName",
            Column::Port => "Port",
            Column::User => "User",
            Column::Password => "Password",
            Column::Desc => "Desc",
        }
    }

    /// Exact, case-sensitive match against a header cell.
    pub fn from_header(cell: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.as_str() == cell)
    }

    /// Tab-joined header line, without a trailing newline.
    pub fn header_line() -> String {
        Column::ALL
            .iter()
            .map(Column::as_str)
            .collect::<Vec<_>>()
            .join("\t")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = SshconfError;

    /// Case-insensitive so `hostname` and `HostName` both work from the command line.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SshconfError::UnknownColumn(wanted.to_string()))
    }
}

/// A host entry.
///
/// All values are text. `password` holds ciphertext at rest and plaintext
/// only after the inventory has been unlocked and the field decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    /// "1" when the host is active in the rendered config
    pub enabled: String,

    /// Free-form display name
    pub name: String,

    /// Host alias used by `ssh <host>`
    pub host: String,

    /// Address or DNS name
    pub host_name: String,

    pub port: String,

    pub user: String,

    pub password: String,

    /// Free-form description
    pub desc: String,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            enabled: "1".to_string(),
            name: String::new(),
            host: String::new(),
            host_name: String::new(),
            port: DEFAULT_PORT.to_string(),
            user: String::new(),
            password: String::new(),
            desc: String::new(),
        }
    }
}

impl Record {
    /// Create an enabled record on the default port.
    pub fn new(host: impl Into<String>, host_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            host_name: host_name.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = if enabled { "1" } else { "0" }.to_string();
        self
    }

    /// Whether the host is rendered uncommented.
    pub fn is_enabled(&self) -> bool {
        self.enabled == "1"
    }

    /// Read a field by column.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Enabled => &self.enabled,
            Column::Name => &self.name,
            Column::Host => &self.host,
            Column::HostName => &self.host_name,
            Column::Port => &self.port,
            Column::User => &self.user,
            Column::Password => &self.password,
            Column::Desc => &self.desc,
        }
    }

    /// Overwrite a field by column.
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        let value = value.into();
        match column {
            Column::Enabled => self.enabled = value,
            Column::Name => self.name = value,
            Column::Host => self.host = value,
            Column::HostName => self.host_name = value,
            Column::Port => self.port = value,
            Column::User => self.user = value,
            Column::Password => self.password = value,
            Column::Desc => self.desc = value,
        }
    }

    /// Field values in header order.
    pub fn to_row(&self) -> Vec<&str> {
        Column::ALL.iter().map(|c| self.get(*c)).collect()
    }

    /// Build a record from named cells. Columns not present stay empty,
    /// except `Port` which falls back to [`DEFAULT_PORT`].
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (Column, &'a str)>,
    {
        let mut record = Record {
            enabled: String::new(),
            port: String::new(),
            ..Record::default()
        };
        for (column, value) in cells {
            record.set(column, value);
        }
        if record.port.trim().is_empty() {
            record.port = DEFAULT_PORT.to_string();
        }
        record
    }

    /// Case-sensitive substring match on Host or Name.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.host.contains(keyword) || self.name.contains(keyword)
    }

    /// Reject values the tab-separated format cannot hold.
    pub fn validate(&self) -> Result<()> {
        for column in Column::ALL {
            let value = self.get(column);
            if value.contains(['\t', '\n', '\r']) {
                return Err(SshconfError::InvalidInput(format!(
                    "{} must not contain tabs or line breaks",
                    column
                )));
            }
        }
        Ok(())
    }
}

/// Records whose Host or Name contains `keyword`, in store order.
pub fn filter_records<'a>(records: &'a [Record], keyword: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| record.matches_keyword(keyword))
        .collect()
}
