//! Configuration types for labnotes.
//!
//! [`Config::load`] reads `~/.config/labnotes/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file on top of the same defaults. [`Config::defaults`] returns the
//! defaults without touching the filesystem (useful in tests).

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[display]
utc_offset_minutes = 0
date_format        = "%m/%d/%Y"
time_format        = "%-I:%M %p"
na_text            = "N/A"

[grouping]
window_ms          = 1000
notes_prefix_chars = 50

# Legacy staff identifier -> display name. Entries here override the
# built-in table.
[authors]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub authors: HashMap<String, String>,
}

/// `[display]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Offset of the viewing site from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_na_text")]
    pub na_text: String,
}

fn default_date_format() -> String { "%m/%d/%Y".to_string() }
fn default_time_format() -> String { "%-I:%M %p".to_string() }
fn default_na_text() -> String { "N/A".to_string() }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            date_format: default_date_format(),
            time_format: default_time_format(),
            na_text: default_na_text(),
        }
    }
}

impl DisplayConfig {
    /// The configured offset; UTC when the value is out of range.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

/// `[grouping]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupingConfig {
    /// Width of the creation-time bucket used to merge modern rows.
    #[serde(default = "default_window_ms")]
    pub window_ms: i64,
    /// Number of leading notes characters that take part in the group key.
    #[serde(default = "default_notes_prefix_chars")]
    pub notes_prefix_chars: usize,
}

fn default_window_ms() -> i64 { 1000 }
fn default_notes_prefix_chars() -> usize { 50 }

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            notes_prefix_chars: default_notes_prefix_chars(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/labnotes/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit config file layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("labnotes")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.display.utc_offset_minutes, 0);
        assert_eq!(cfg.display.date_format, "%m/%d/%Y");
        assert_eq!(cfg.display.na_text, "N/A");
        assert_eq!(cfg.grouping.window_ms, 1000);
        assert_eq!(cfg.grouping.notes_prefix_chars, 50);
        assert!(cfg.authors.is_empty());
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let display = DisplayConfig { utc_offset_minutes: 100_000, ..DisplayConfig::default() };
        assert_eq!(display.offset().local_minus_utc(), 0);
        let display = DisplayConfig { utc_offset_minutes: 480, ..DisplayConfig::default() };
        assert_eq!(display.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn file_overrides_are_layered_on_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[grouping]\nwindow_ms = 2000\n\n[authors]\n\"999\" = \"Visiting Analyst\"").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.grouping.window_ms, 2000);
        assert_eq!(cfg.grouping.notes_prefix_chars, 50);
        assert_eq!(cfg.authors.get("999").map(String::as_str), Some("Visiting Analyst"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(Config::load_from(&path).is_err());
    }
}
