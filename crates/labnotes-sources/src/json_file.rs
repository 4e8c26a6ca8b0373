//! JSON export source.
//!
//! Reads legacy and modern records from JSON array files, one file per
//! source. A side with no configured path reports
//! [`SourceError::NotConfigured`], which the fetch layer treats like any
//! other single-source failure.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use labnotes_core::{LegacyRecord, ModernRecord, NotebookSource, SourceError, SourceRecord};
use serde_json::from_slice;
use tokio::fs;
use tracing::{debug, warn};

use crate::specimen_matches;

/// Notebook source backed by JSON export files on disk.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    legacy_path: Option<PathBuf>,
    modern_path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(legacy_path: Option<PathBuf>, modern_path: Option<PathBuf>) -> Self {
        Self { legacy_path, modern_path }
    }

    pub fn legacy_path(&self) -> Option<&Path> {
        self.legacy_path.as_deref()
    }

    pub fn modern_path(&self) -> Option<&Path> {
        self.modern_path.as_deref()
    }
}

async fn read_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, SourceError> {
    let bytes = fs::read(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "json_file: read failed");
        e
    })?;
    let records: Vec<T> = from_slice(&bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "json_file: parse failed");
        e
    })?;
    debug!(path = %path.display(), count = records.len(), "json_file: loaded");
    Ok(records)
}

#[async_trait]
impl NotebookSource for JsonFileSource {
    async fn fetch_legacy(&self, specimen: Option<&str>) -> Result<Vec<LegacyRecord>, SourceError> {
        let path = self.legacy_path.as_deref().ok_or(SourceError::NotConfigured("legacy"))?;
        let mut records: Vec<LegacyRecord> = read_array(path).await?;
        records.retain(|r| specimen_matches(specimen, &r.specimen_number));
        Ok(records)
    }

    async fn fetch_modern(&self, specimen: Option<&str>) -> Result<Vec<ModernRecord>, SourceError> {
        let path = self.modern_path.as_deref().ok_or(SourceError::NotConfigured("modern"))?;
        let mut records: Vec<ModernRecord> = read_array(path).await?;
        records.retain(|r| specimen_matches(specimen, &r.specimen_number));
        Ok(records)
    }
}

/// Load a single JSON array of `kind`-tagged records, keeping each record's
/// source tag for [`Pipeline::build_from_records`](labnotes_core::Pipeline::build_from_records).
pub async fn load_mixed(
    path: &Path,
    specimen: Option<&str>,
) -> Result<Vec<SourceRecord>, SourceError> {
    let mut records: Vec<SourceRecord> = read_array(path).await?;
    records.retain(|r| specimen_matches(specimen, r.specimen_number()));
    Ok(records)
}
