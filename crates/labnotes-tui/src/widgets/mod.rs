//! Ratatui widgets for the labnotes viewer.

pub mod detail;
pub mod entry_list;
pub mod help;
pub mod load_error;
