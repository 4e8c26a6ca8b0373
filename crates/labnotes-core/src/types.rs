//! Core types for labnotes-core.
//!
//! This module defines the two raw record shapes read from upstream sources
//! ([`LegacyRecord`], [`ModernRecord`]), the tagged [`SourceRecord`] union that
//! carries them through the pipeline, the intermediate [`NormalizedEntry`],
//! and the display-ready [`GroupedEntry`] / [`Timeline`] produced at the end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A read-only row from the laboratory information system's audit log.
///
/// Every legacy row is already one complete notebook entry; legacy rows are
/// never grouped with each other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyRecord {
    pub specimen_number: String,
    /// Names associated with the specimen (patient, submitter, ...).
    pub names: Vec<String>,
    pub notes: String,
    /// Opaque staff identifier, resolved through an [`AuthorLookup`](crate::authors::AuthorLookup).
    pub author_id: String,
    /// Raw creation timestamp as exported upstream. Parsed leniently.
    pub created_at: Option<String>,
    /// Raw timestamp of the latest in-place edit, if any.
    pub last_modified_at: Option<String>,
}

/// A row written by the application's own notebook feature.
///
/// One submission with several uploaded files produces one row per file, all
/// sharing specimen, author, notes and (to within a second) creation time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModernRecord {
    pub specimen_number: String,
    pub names: Vec<String>,
    pub notes: String,
    /// Author display name, stored as text.
    pub author_name: String,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    /// Filename of the single uploaded file attached to this row.
    pub attachment: Option<String>,
}

/// A record tagged with the source it was fetched from.
///
/// The tag is set where records enter the system (the fetch boundary) and is
/// serialized as an explicit `"kind"` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceRecord {
    Legacy(LegacyRecord),
    Modern(ModernRecord),
}

impl SourceRecord {
    pub fn origin(&self) -> Origin {
        match self {
            SourceRecord::Legacy(_) => Origin::Legacy,
            SourceRecord::Modern(_) => Origin::Modern,
        }
    }

    pub fn specimen_number(&self) -> &str {
        match self {
            SourceRecord::Legacy(r) => &r.specimen_number,
            SourceRecord::Modern(r) => &r.specimen_number,
        }
    }
}

impl From<LegacyRecord> for SourceRecord {
    fn from(record: LegacyRecord) -> Self {
        SourceRecord::Legacy(record)
    }
}

impl From<ModernRecord> for SourceRecord {
    fn from(record: ModernRecord) -> Self {
        SourceRecord::Modern(record)
    }
}

/// Which source produced an entry. Used by renderers for styling and for the
/// legacy → modern separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Legacy,
    Modern,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Legacy => write!(f, "legacy"),
            Origin::Modern => write!(f, "modern"),
        }
    }
}

/// A record of either shape mapped onto common fields, with author resolved
/// and timestamps rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub specimen_number: String,
    pub names: Vec<String>,
    pub notes: String,
    pub author_display_name: String,
    /// Parsed creation instant; `None` when missing or malformed.
    pub created_at: Option<DateTime<Utc>>,
    pub created_date: String,
    pub created_time: String,
    pub last_modified_display: String,
    pub origin: Origin,
    /// Uploaded filename (modern rows only).
    pub attachment: Option<String>,
    /// Raw staff identifier (legacy rows only).
    pub author_id: Option<String>,
}

impl NormalizedEntry {
    /// Creation instant in epoch milliseconds, `0` when unknown.
    pub fn sort_key(&self) -> i64 {
        self.created_at.map(|ts| ts.timestamp_millis()).unwrap_or(0)
    }
}

/// The de-duplicated, display-ready unit: one per legacy row, one per modern
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedEntry {
    pub specimen_number: String,
    pub names: Vec<String>,
    pub notes: String,
    pub created_date: String,
    pub created_time: String,
    pub last_modified_display: String,
    pub author_display_name: String,
    /// Attachment filenames in order of first appearance, no duplicates.
    pub attachments: Vec<String>,
    pub origin: Origin,
    pub sort_key: i64,
}

impl GroupedEntry {
    /// Seed a grouped entry from the first record seen for its group.
    pub fn seed(entry: &NormalizedEntry) -> Self {
        Self {
            specimen_number: entry.specimen_number.clone(),
            names: entry.names.clone(),
            notes: entry.notes.clone(),
            created_date: entry.created_date.clone(),
            created_time: entry.created_time.clone(),
            last_modified_display: entry.last_modified_display.clone(),
            author_display_name: entry.author_display_name.clone(),
            attachments: entry.attachment.iter().cloned().collect(),
            origin: entry.origin,
            sort_key: entry.sort_key(),
        }
    }

    /// Append `name` unless it is already attached.
    pub fn add_attachment(&mut self, name: &str) {
        if !self.attachments.iter().any(|a| a == name) {
            self.attachments.push(name.to_string());
        }
    }
}

/// One rendered row of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    /// Draw the legacy → modern separator immediately before this entry.
    pub separator_before: bool,
    #[serde(flatten)]
    pub entry: GroupedEntry,
}

/// Chronologically ordered grouped entries, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    rows: Vec<TimelineRow>,
}

impl Timeline {
    pub fn new(rows: Vec<TimelineRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineRow> {
        self.rows.iter()
    }

    /// Index of the row carrying the separator, if any.
    pub fn separator_index(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.separator_before)
    }

    pub fn into_rows(self) -> Vec<TimelineRow> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineRow;
    type IntoIter = std::slice::Iter<'a, TimelineRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
