//! Legacy author resolution.
//!
//! Legacy audit rows only carry a staff identifier. [`AuthorLookup`] is the
//! seam through which the normalizer turns that identifier into a display
//! name; [`AuthorDirectory`] is the production implementation, a closed
//! compile-time table of known staff with per-site overrides from config.

use std::collections::HashMap;

/// Display text used when no author can be determined.
pub const UNKNOWN_AUTHOR: &str = "N/A";

/// Known laboratory staff identifiers in the legacy system.
static BUILTIN_AUTHORS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "101" => "R. Villanueva",
    "114" => "C. Bautista",
    "127" => "M. Ocampo",
    "132" => "J. Navarro",
    "145" => "L. Mendoza",
    "158" => "A. Castillo",
    "203" => "E. Ramos",
    "210" => "P. Aquino",
    "216" => "T. Salazar",
    "224" => "G. Fernandez",
};

/// Maps a legacy staff identifier to a display name.
pub trait AuthorLookup: Send + Sync {
    fn lookup(&self, id: &str) -> Option<&str>;
}

impl AuthorLookup for HashMap<String, String> {
    fn lookup(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

/// The built-in staff table layered under optional overrides.
#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    overrides: HashMap<String, String>,
}

impl AuthorDirectory {
    /// Only the built-in table.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Built-in table with `overrides` taking precedence.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Number of distinct identifiers this directory can resolve.
    pub fn len(&self) -> usize {
        let extra = self
            .overrides
            .keys()
            .filter(|k| !BUILTIN_AUTHORS.contains_key(k.as_str()))
            .count();
        BUILTIN_AUTHORS.len() + extra
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuthorLookup for AuthorDirectory {
    fn lookup(&self, id: &str) -> Option<&str> {
        self.overrides
            .get(id)
            .map(String::as_str)
            .or_else(|| BUILTIN_AUTHORS.get(id).copied())
    }
}

/// Resolve a legacy author identifier for display.
///
/// Empty identifier → [`UNKNOWN_AUTHOR`]; known identifier → its name;
/// anything else → the raw identifier.
pub fn resolve_legacy_author(lookup: &dyn AuthorLookup, id: &str) -> String {
    let id = id.trim();
    if id.is_empty() {
        return UNKNOWN_AUTHOR.to_string();
    }
    lookup.lookup(id).unwrap_or(id).to_string()
}
