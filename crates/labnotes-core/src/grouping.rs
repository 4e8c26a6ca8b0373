//! Grouping keys: decide which normalized rows collapse into one entry.
//!
//! Modern rows from one submission share specimen, author, notes and creation
//! second, so their key is built from exactly those (notes truncated, time
//! floored to the configured window). Legacy rows must never merge, so their
//! key carries a per-builder nonce that makes every legacy key unique.
//!
//! Two distinct modern submissions by the same author, for the same specimen,
//! with the same notes, inside the same window will merge; a single submission
//! whose rows straddle a window boundary will split. Both follow from bucketing
//! by window and are kept as-is.

use crate::config::GroupingConfig;
use crate::types::{NormalizedEntry, Origin};

/// Key under which normalized rows are folded together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Legacy {
        specimen_number: String,
        created_ms: Option<i64>,
        author_id: String,
        nonce: u64,
    },
    Modern {
        specimen_number: String,
        author: String,
        notes_prefix: String,
        /// `created_ms` floored to the grouping window; `None` when undated.
        created_bucket: Option<i64>,
    },
}

impl GroupKey {
    pub fn origin(&self) -> Origin {
        match self {
            GroupKey::Legacy { .. } => Origin::Legacy,
            GroupKey::Modern { .. } => Origin::Modern,
        }
    }
}

/// Builds [`GroupKey`]s for one aggregation pass.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    window_ms: i64,
    notes_prefix_chars: usize,
    next_nonce: u64,
}

impl KeyBuilder {
    pub fn new(config: &GroupingConfig) -> Self {
        Self {
            window_ms: config.window_ms.max(1),
            notes_prefix_chars: config.notes_prefix_chars,
            next_nonce: 0,
        }
    }

    pub fn key_for(&mut self, entry: &NormalizedEntry) -> GroupKey {
        let created_ms = entry.created_at.map(|ts| ts.timestamp_millis());
        match entry.origin {
            Origin::Legacy => {
                let nonce = self.next_nonce;
                self.next_nonce += 1;
                GroupKey::Legacy {
                    specimen_number: entry.specimen_number.clone(),
                    created_ms,
                    author_id: entry.author_id.clone().unwrap_or_default(),
                    nonce,
                }
            }
            Origin::Modern => GroupKey::Modern {
                specimen_number: entry.specimen_number.clone(),
                author: entry.author_display_name.clone(),
                notes_prefix: notes_prefix(&entry.notes, self.notes_prefix_chars),
                created_bucket: created_ms.map(|ms| ms.div_euclid(self.window_ms)),
            },
        }
    }
}

/// First `max_chars` characters of `notes`, cut on a char boundary.
pub fn notes_prefix(notes: &str, max_chars: usize) -> String {
    notes.chars().take(max_chars).collect()
}
