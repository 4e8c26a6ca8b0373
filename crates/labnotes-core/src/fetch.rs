//! Best-effort concurrent retrieval of both notebook sources.
//!
//! [`fetch_both`] fires the legacy and modern requests together and waits for
//! both. A failing side is logged and replaced by an empty list so the other
//! side still renders; only when both fail does the caller get an error.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, SourceError};
use crate::types::{LegacyRecord, ModernRecord};

/// Provider of raw notebook records.
///
/// `specimen` restricts results to one specimen number when set.
#[async_trait]
pub trait NotebookSource: Send + Sync {
    async fn fetch_legacy(&self, specimen: Option<&str>) -> Result<Vec<LegacyRecord>, SourceError>;

    async fn fetch_modern(&self, specimen: Option<&str>) -> Result<Vec<ModernRecord>, SourceError>;
}

/// Records from one fetch, with note of which side (if any) degraded.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub legacy: Vec<LegacyRecord>,
    pub modern: Vec<ModernRecord>,
    pub legacy_error: Option<SourceError>,
    pub modern_error: Option<SourceError>,
}

impl FetchOutcome {
    /// True when one of the two sources failed and was substituted.
    pub fn is_degraded(&self) -> bool {
        self.legacy_error.is_some() || self.modern_error.is_some()
    }
}

/// Fetch both sources concurrently, tolerating either one failing.
pub async fn fetch_both<S>(source: &S, specimen: Option<&str>) -> Result<FetchOutcome, FetchError>
where
    S: NotebookSource + ?Sized,
{
    let (legacy, modern) = tokio::join!(source.fetch_legacy(specimen), source.fetch_modern(specimen));

    match (legacy, modern) {
        (Err(legacy), Err(modern)) => {
            warn!(error.legacy = %legacy, error.modern = %modern, "fetch: all sources failed");
            Err(FetchError::AllSourcesFailed { legacy, modern })
        }
        (legacy, modern) => {
            let mut outcome = FetchOutcome::default();
            match legacy {
                Ok(records) => outcome.legacy = records,
                Err(e) => {
                    warn!(error = %e, "fetch: legacy source failed, continuing without it");
                    outcome.legacy_error = Some(e);
                }
            }
            match modern {
                Ok(records) => outcome.modern = records,
                Err(e) => {
                    warn!(error = %e, "fetch: modern source failed, continuing without it");
                    outcome.modern_error = Some(e);
                }
            }
            debug!(
                legacy = outcome.legacy.len(),
                modern = outcome.modern.len(),
                degraded = outcome.is_degraded(),
                "fetch: complete"
            );
            Ok(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        legacy_ok: bool,
        modern_ok: bool,
    }

    #[async_trait]
    impl NotebookSource for Fixed {
        async fn fetch_legacy(&self, _: Option<&str>) -> Result<Vec<LegacyRecord>, SourceError> {
            if self.legacy_ok {
                Ok(vec![LegacyRecord::default()])
            } else {
                Err(SourceError::Unavailable("legacy down".into()))
            }
        }

        async fn fetch_modern(&self, _: Option<&str>) -> Result<Vec<ModernRecord>, SourceError> {
            if self.modern_ok {
                Ok(vec![ModernRecord::default(), ModernRecord::default()])
            } else {
                Err(SourceError::Unavailable("modern down".into()))
            }
        }
    }

    #[tokio::test]
    async fn both_ok() {
        let out = fetch_both(&Fixed { legacy_ok: true, modern_ok: true }, None).await.unwrap();
        assert_eq!(out.legacy.len(), 1);
        assert_eq!(out.modern.len(), 2);
        assert!(!out.is_degraded());
    }

    #[tokio::test]
    async fn one_side_failing_degrades() {
        let out = fetch_both(&Fixed { legacy_ok: false, modern_ok: true }, None).await.unwrap();
        assert!(out.legacy.is_empty());
        assert_eq!(out.modern.len(), 2);
        assert!(matches!(out.legacy_error, Some(SourceError::Unavailable(_))));
        assert!(out.is_degraded());
    }

    #[tokio::test]
    async fn both_failing_is_an_error() {
        let err = fetch_both(&Fixed { legacy_ok: false, modern_ok: false }, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("legacy down"));
        assert!(err.to_string().contains("modern down"));
    }
}
