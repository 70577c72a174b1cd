//! Output formatting for hosts.

mod json;

pub use json::records_json;

use sshconf_core::{Column as Field, Record};

use crate::ui::{table, Column, UiContext};

const HOST_COLUMNS: [Column; 8] = [
    Column::new("Enabled"),
    Column::new("Name"),
    Column::new("Host"),
    Column::new("HostName"),
    Column::new("Port"),
    Column::new("User"),
    Column::new("Password"),
    Column::new("Desc"),
];

/// One table row per record, in header order.
pub fn record_rows(records: &[Record]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            Field::ALL
                .iter()
                .map(|field| record.get(*field).to_string())
                .collect()
        })
        .collect()
}

/// Render records as a table (pretty) or tab-separated lines (plain).
pub fn hosts_table(ctx: &UiContext, records: &[Record]) -> String {
    table(ctx, &HOST_COLUMNS, &record_rows(records))
}
