//! Pipeline: runs normalize → group → aggregate → present over one fetch.
//!
//! A [`Pipeline`] holds only its injected author lookup and settings. Every
//! call builds fresh structures; nothing is cached between calls, so entries
//! added by other users show up on the next refresh.

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::aggregate;
use crate::authors::{AuthorDirectory, AuthorLookup};
use crate::config::{Config, DisplayConfig, GroupingConfig};
use crate::fetch::FetchOutcome;
use crate::grouping::KeyBuilder;
use crate::normalizer::Normalizer;
use crate::presenter::present;
use crate::types::{LegacyRecord, ModernRecord, NormalizedEntry, SourceRecord, Timeline};

/// A built timeline plus a note for each source that failed while fetching it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Snapshot {
    pub timeline: Timeline,
    /// `"<side>: <error>"` for every degraded side, legacy first.
    pub degraded: Vec<String>,
}

#[derive(Clone)]
pub struct Pipeline {
    authors: Arc<dyn AuthorLookup>,
    display: DisplayConfig,
    grouping: GroupingConfig,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("display", &self.display)
            .field("grouping", &self.grouping)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn new(authors: impl AuthorLookup + 'static, config: &Config) -> Self {
        Self {
            authors: Arc::new(authors),
            display: config.display.clone(),
            grouping: config.grouping.clone(),
        }
    }

    /// Pipeline using the built-in author table plus `config.authors`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(AuthorDirectory::with_overrides(config.authors.clone()), config)
    }

    /// Build the timeline for one fetch. Legacy rows are folded first.
    pub fn build_timeline(&self, legacy: &[LegacyRecord], modern: &[ModernRecord]) -> Timeline {
        let normalizer = Normalizer::new(self.authors.as_ref(), &self.display);
        let entries: Vec<NormalizedEntry> = legacy
            .iter()
            .map(|r| normalizer.normalize_legacy(r))
            .chain(modern.iter().map(|r| normalizer.normalize_modern(r)))
            .collect();
        self.fold(entries, legacy.len(), modern.len())
    }

    /// Build the timeline from an already tagged, possibly mixed list.
    pub fn build_from_records(&self, records: &[SourceRecord]) -> Timeline {
        let normalizer = Normalizer::new(self.authors.as_ref(), &self.display);
        let entries = normalizer.normalize_all(records);
        let legacy = records
            .iter()
            .filter(|r| matches!(r, SourceRecord::Legacy(_)))
            .count();
        self.fold(entries, legacy, records.len() - legacy)
    }

    /// Build the timeline for a fetch that may have lost one side.
    pub fn build_snapshot(&self, outcome: &FetchOutcome) -> Snapshot {
        let degraded = [("legacy", &outcome.legacy_error), ("modern", &outcome.modern_error)]
            .into_iter()
            .filter_map(|(side, err)| err.as_ref().map(|e| format!("{side}: {e}")))
            .collect();
        Snapshot {
            timeline: self.build_timeline(&outcome.legacy, &outcome.modern),
            degraded,
        }
    }

    fn fold(&self, entries: Vec<NormalizedEntry>, legacy: usize, modern: usize) -> Timeline {
        let mut keys = KeyBuilder::new(&self.grouping);
        let groups = aggregate(&entries, &mut keys);
        let grouped = groups.len();
        let timeline = present(groups);
        debug!(
            legacy,
            modern,
            grouped,
            separator = ?timeline.separator_index(),
            "pipeline: timeline built"
        );
        timeline
    }
}
