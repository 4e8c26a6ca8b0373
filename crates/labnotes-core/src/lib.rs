//! labnotes-core — notebook entry reconciliation.
//!
//! Laboratory notebook entries live in two places: the legacy information
//! system's audit log (one row per entry, author as a staff id) and the
//! application's own notebook table (one row per uploaded file). This crate
//! turns both into a single chronological timeline of display-ready entries.
//!
//! # Architecture
//!
//! ```text
//! fetch_both ──► Normalizer ──► KeyBuilder ──► aggregate ──► present ──► Timeline
//!  (concurrent)   (authors,      (group keys)   (attachment    (sort +
//!                  timestamps)                   union)         separator)
//! ```
//!
//! Every stage after the fetch is pure and total.

pub mod aggregate;
pub mod authors;
pub mod config;
pub mod error;
pub mod fetch;
pub mod grouping;
pub mod normalizer;
pub mod pipeline;
pub mod presenter;
pub mod types;

pub use authors::{AuthorDirectory, AuthorLookup};
pub use error::{FetchError, SourceError};
pub use fetch::{fetch_both, FetchOutcome, NotebookSource};
pub use pipeline::{Pipeline, Snapshot};
pub use types::{
    GroupedEntry, LegacyRecord, ModernRecord, NormalizedEntry, Origin, SourceRecord, Timeline,
    TimelineRow,
};
