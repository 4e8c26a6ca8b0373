//! Error types for record fetching.
//!
//! The pipeline stages themselves are total and never fail; only the fetch
//! boundary in front of them can.

use thiserror::Error;

/// A single notebook source could not produce its records.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} source is not configured")]
    NotConfigured(&'static str),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Neither notebook source produced records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("all notebook sources failed (legacy: {legacy}; modern: {modern})")]
    AllSourcesFailed {
        legacy: SourceError,
        modern: SourceError,
    },
}
