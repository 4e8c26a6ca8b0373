//! In-memory notebook source.
//!
//! Holds records directly, optionally failing either side or delaying both.
//! Used by the CLI's `--demo` mode and throughout the test harnesses.

use std::time::Duration;

use async_trait::async_trait;
use labnotes_core::{LegacyRecord, ModernRecord, NotebookSource, SourceError};

use crate::specimen_matches;

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    legacy: Vec<LegacyRecord>,
    modern: Vec<ModernRecord>,
    legacy_failure: Option<String>,
    modern_failure: Option<String>,
    delay: Option<Duration>,
}

impl MemorySource {
    pub fn new(legacy: Vec<LegacyRecord>, modern: Vec<ModernRecord>) -> Self {
        Self { legacy, modern, ..Self::default() }
    }

    /// Make `fetch_legacy` fail with [`SourceError::Unavailable`].
    pub fn failing_legacy(mut self, reason: impl Into<String>) -> Self {
        self.legacy_failure = Some(reason.into());
        self
    }

    /// Make `fetch_modern` fail with [`SourceError::Unavailable`].
    pub fn failing_modern(mut self, reason: impl Into<String>) -> Self {
        self.modern_failure = Some(reason.into());
        self
    }

    /// Sleep this long inside each fetch before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl NotebookSource for MemorySource {
    async fn fetch_legacy(&self, specimen: Option<&str>) -> Result<Vec<LegacyRecord>, SourceError> {
        self.pause().await;
        if let Some(reason) = &self.legacy_failure {
            return Err(SourceError::Unavailable(reason.clone()));
        }
        Ok(self
            .legacy
            .iter()
            .filter(|r| specimen_matches(specimen, &r.specimen_number))
            .cloned()
            .collect())
    }

    async fn fetch_modern(&self, specimen: Option<&str>) -> Result<Vec<ModernRecord>, SourceError> {
        self.pause().await;
        if let Some(reason) = &self.modern_failure {
            return Err(SourceError::Unavailable(reason.clone()));
        }
        Ok(self
            .modern
            .iter()
            .filter(|r| specimen_matches(specimen, &r.specimen_number))
            .cloned()
            .collect())
    }
}
