//! labnotes — specimen notebook timeline
//!
//! Merges notebook entries from the legacy audit-log system and the modern
//! attachment-per-row system into one chronological timeline. This crate is
//! the thin binary-facing layer: fetch-then-build glue plus the plain-text
//! and JSON renderers used outside the TUI.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► fetch_both ──► Pipeline ──► Snapshot ──► TUI (reloads on `r`)
//!  (json / memory /   (concurrent)  (normalize,       └─► table / json
//!   mixed file)                      group, present)
//! ```

pub mod demo;
pub mod render;

use std::path::PathBuf;

use anyhow::Context;
use labnotes_core::{fetch_both, FetchError, NotebookSource, Pipeline, Snapshot, Timeline};
use labnotes_sources::load_mixed;

/// Where a run reads its records from.
pub enum Feed {
    /// Separate legacy and modern sides, fetched concurrently.
    Sources(Box<dyn NotebookSource>),
    /// One export of `kind`-tagged records from both systems.
    Mixed(PathBuf),
}

impl Feed {
    /// Fetch and build a fresh snapshot. Called once per refresh.
    pub async fn snapshot(
        &self,
        specimen: Option<&str>,
        pipeline: &Pipeline,
    ) -> anyhow::Result<Snapshot> {
        match self {
            Feed::Sources(source) => {
                Ok(snapshot_from_source(source.as_ref(), specimen, pipeline).await?)
            }
            Feed::Mixed(path) => {
                let records = load_mixed(path, specimen)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok(Snapshot {
                    timeline: pipeline.build_from_records(&records),
                    degraded: Vec::new(),
                })
            }
        }
    }
}

/// Fetch both sides of `source` concurrently and fold them into a snapshot.
///
/// A single failing side is logged and treated as empty; only a failure of
/// both sides is an error.
pub async fn snapshot_from_source<S>(
    source: &S,
    specimen: Option<&str>,
    pipeline: &Pipeline,
) -> Result<Snapshot, FetchError>
where
    S: NotebookSource + ?Sized,
{
    let outcome = fetch_both(source, specimen).await?;
    if outcome.is_degraded() {
        tracing::info!(
            legacy_failed = outcome.legacy_error.is_some(),
            modern_failed = outcome.modern_error.is_some(),
            "building timeline from partial results"
        );
    }
    Ok(pipeline.build_snapshot(&outcome))
}

/// [`snapshot_from_source`] without the degraded-side notes.
pub async fn timeline_from_source<S>(
    source: &S,
    specimen: Option<&str>,
    pipeline: &Pipeline,
) -> Result<Timeline, FetchError>
where
    S: NotebookSource + ?Sized,
{
    Ok(snapshot_from_source(source, specimen, pipeline).await?.timeline)
}
