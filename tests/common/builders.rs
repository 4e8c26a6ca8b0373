//! Test builders — ergonomic constructors for legacy and modern records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. Timestamps are given in epoch milliseconds and rendered as
//! RFC 3339 strings, the shape the export files carry.

use chrono::{DateTime, SecondsFormat, Utc};
use labnotes_core::{LegacyRecord, ModernRecord};

/// RFC 3339 rendering of an epoch-millisecond instant.
pub fn iso(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .expect("test timestamp in range")
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// LegacyRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LegacyRecord`] fixtures.
///
/// ```rust
/// let record = LegacyRecordBuilder::new("L-1").author_id("210").at(T0).build();
/// ```
pub struct LegacyRecordBuilder {
    record: LegacyRecord,
}

impl LegacyRecordBuilder {
    pub fn new(specimen: impl Into<String>) -> Self {
        Self {
            record: LegacyRecord {
                specimen_number: specimen.into(),
                names: vec!["DOE, JOHN".to_string()],
                ..LegacyRecord::default()
            },
        }
    }

    pub fn author_id(mut self, id: impl Into<String>) -> Self {
        self.record.author_id = id.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.record.notes = notes.into();
        self
    }

    pub fn at(mut self, ms: i64) -> Self {
        self.record.created_at = Some(iso(ms));
        self
    }

    /// Raw creation timestamp string, for malformed-input cases.
    pub fn created_raw(mut self, raw: impl Into<String>) -> Self {
        self.record.created_at = Some(raw.into());
        self
    }

    pub fn modified_at(mut self, ms: i64) -> Self {
        self.record.last_modified_at = Some(iso(ms));
        self
    }

    pub fn build(self) -> LegacyRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// ModernRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ModernRecord`] fixtures.
///
/// ```rust
/// let row = ModernRecordBuilder::new("L-1")
///     .author("Jane Doe")
///     .notes("check sample")
///     .at(T0 + 5_000)
///     .attachment("x.pdf")
///     .build();
/// ```
pub struct ModernRecordBuilder {
    record: ModernRecord,
}

impl ModernRecordBuilder {
    pub fn new(specimen: impl Into<String>) -> Self {
        Self {
            record: ModernRecord {
                specimen_number: specimen.into(),
                names: vec!["DOE, JOHN".to_string()],
                author_name: "Jane Doe".to_string(),
                ..ModernRecord::default()
            },
        }
    }

    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.record.author_name = name.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.record.notes = notes.into();
        self
    }

    pub fn at(mut self, ms: i64) -> Self {
        self.record.created_at = Some(iso(ms));
        self
    }

    pub fn attachment(mut self, name: impl Into<String>) -> Self {
        self.record.attachment = Some(name.into());
        self
    }

    pub fn build(self) -> ModernRecord {
        self.record
    }
}
