//! Normalizer: maps [`LegacyRecord`] and [`ModernRecord`] rows onto the common
//! [`NormalizedEntry`] shape.
//!
//! Everything here is total: missing or malformed timestamps render as the
//! configured "N/A" text, unknown authors fall back to their raw identifier,
//! and a bad user-supplied format string degrades to "N/A" instead of
//! panicking inside `chrono`.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::authors::{resolve_legacy_author, AuthorLookup, UNKNOWN_AUTHOR};
use crate::config::DisplayConfig;
use crate::types::{LegacyRecord, ModernRecord, NormalizedEntry, Origin, SourceRecord};

/// Naive layouts seen in Oracle / MySQL exports. Interpreted as UTC.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Shorter digit runs (compact dates like `20240305`, stray zeros) are not
/// epoch milliseconds. Twelve digits starts in 1973.
const MIN_EPOCH_MILLIS_DIGITS: usize = 12;

/// Parse an upstream timestamp leniently.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[ T]HH:MM:SS[.fff]` (as UTC), a bare
/// `YYYY-MM-DD` date (midnight UTC) and integer epoch milliseconds of at
/// least twelve digits. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        if raw.len() < MIN_EPOCH_MILLIS_DIGITS {
            return None;
        }
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Converts raw records into [`NormalizedEntry`] values.
pub struct Normalizer<'a> {
    authors: &'a dyn AuthorLookup,
    display: &'a DisplayConfig,
    offset: FixedOffset,
}

impl<'a> Normalizer<'a> {
    pub fn new(authors: &'a dyn AuthorLookup, display: &'a DisplayConfig) -> Self {
        Self { authors, display, offset: display.offset() }
    }

    pub fn normalize(&self, record: &SourceRecord) -> NormalizedEntry {
        match record {
            SourceRecord::Legacy(r) => self.normalize_legacy(r),
            SourceRecord::Modern(r) => self.normalize_modern(r),
        }
    }

    pub fn normalize_all(&self, records: &[SourceRecord]) -> Vec<NormalizedEntry> {
        records.iter().map(|r| self.normalize(r)).collect()
    }

    pub fn normalize_legacy(&self, record: &LegacyRecord) -> NormalizedEntry {
        let created_at = record.created_at.as_deref().and_then(parse_timestamp);
        let (created_date, created_time) = self.date_and_time(created_at);

        NormalizedEntry {
            specimen_number: record.specimen_number.trim().to_string(),
            names: record.names.clone(),
            notes: record.notes.clone(),
            author_display_name: resolve_legacy_author(self.authors, &record.author_id),
            created_at,
            created_date,
            created_time,
            last_modified_display: self.last_modified(record.last_modified_at.as_deref()),
            origin: Origin::Legacy,
            attachment: None,
            author_id: Some(record.author_id.trim().to_string()),
        }
    }

    pub fn normalize_modern(&self, record: &ModernRecord) -> NormalizedEntry {
        let created_at = record.created_at.as_deref().and_then(parse_timestamp);
        let (created_date, created_time) = self.date_and_time(created_at);

        let author = record.author_name.trim();
        let author_display_name = if author.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            author.to_string()
        };

        let attachment = record
            .attachment
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        NormalizedEntry {
            specimen_number: record.specimen_number.trim().to_string(),
            names: record.names.clone(),
            notes: record.notes.clone(),
            author_display_name,
            created_at,
            created_date,
            created_time,
            last_modified_display: self.last_modified(record.modified_at.as_deref()),
            origin: Origin::Modern,
            attachment,
            author_id: None,
        }
    }

    fn date_and_time(&self, ts: Option<DateTime<Utc>>) -> (String, String) {
        match ts {
            Some(ts) => (
                self.format(ts, &self.display.date_format),
                self.format(ts, &self.display.time_format),
            ),
            None => (self.display.na_text.clone(), self.display.na_text.clone()),
        }
    }

    fn last_modified(&self, raw: Option<&str>) -> String {
        match raw.and_then(parse_timestamp) {
            Some(ts) => format!(
                "{} {}",
                self.format(ts, &self.display.date_format),
                self.format(ts, &self.display.time_format)
            ),
            None => self.display.na_text.clone(),
        }
    }

    fn format(&self, ts: DateTime<Utc>, fmt: &str) -> String {
        let local = ts.with_timezone(&self.offset);
        let mut out = String::new();
        match write!(out, "{}", local.format(fmt)) {
            Ok(()) => out,
            Err(_) => self.display.na_text.clone(),
        }
    }
}
