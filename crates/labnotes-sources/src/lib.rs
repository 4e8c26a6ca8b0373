//! Notebook record source adapters for labnotes.
//!
//! Each adapter implements [`labnotes_core::NotebookSource`] and hands raw
//! [`LegacyRecord`](labnotes_core::LegacyRecord) /
//! [`ModernRecord`](labnotes_core::ModernRecord) rows to the pipeline. The
//! relational databases themselves sit behind JSON exports; this crate never
//! talks SQL.

pub mod json_file;
pub mod memory;

pub use json_file::{load_mixed, JsonFileSource};
pub use memory::MemorySource;

/// True when `specimen` is unset or matches `candidate` (trimmed,
/// case-insensitive).
pub(crate) fn specimen_matches(specimen: Option<&str>, candidate: &str) -> bool {
    match specimen.map(str::trim) {
        None | Some("") => true,
        Some(wanted) => candidate.trim().eq_ignore_ascii_case(wanted),
    }
}
