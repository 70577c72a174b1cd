//! Input and editor helpers for the CLI.

mod editor;
mod input;

pub use editor::open_in_editor;
pub use input::{prompt_master_password, prompt_new_master_password, prompt_record, RecordDraft};
