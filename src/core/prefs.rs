//! # Preference Store
//!
//! Persists the theme and the last search between runs in
//! `~/.terra/preferences.json`, a flat map of string keys to string values:
//!
//! ```json
//! { "theme-choice": "dark", "filters": "{\"term\":\"fr\",\"region\":\"Europe\"}" }
//! ```
//!
//! Reads never fail: an unreadable or malformed file, or a malformed
//! `filters` value, behaves like a missing one. Writes use atomic rename
//! (write `.tmp`, then `rename()`).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::Theme;

pub const THEME_KEY: &str = "theme-choice";
pub const FILTER_KEY: &str = "filters";

/// The last search, as restored on startup. Each field is only present if
/// it was stored as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedFilters {
    pub term: Option<String>,
    pub region: Option<String>,
}

#[derive(Serialize)]
struct FiltersRecord<'a> {
    term: &'a str,
    region: &'a str,
}

/// Returns `~/.terra/preferences.json`.
pub fn default_prefs_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".terra").join("preferences.json"))
}

pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads one key. Missing file, malformed file, missing key and
    /// non-string values all read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    /// Writes one key, keeping the others.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &entries)
    }

    pub fn load_theme(&self) -> Option<Theme> {
        self.get(THEME_KEY).and_then(|value| Theme::parse(&value))
    }

    pub fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.set(THEME_KEY, theme.as_str()) {
            warn!("Failed to save theme preference: {}", e);
        }
    }

    pub fn load_filters(&self) -> Option<SavedFilters> {
        let raw = self.get(FILTER_KEY)?;
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                debug!("Ignoring malformed saved filters: {}", e);
                return None;
            }
        };
        let field = |name: &str| parsed.get(name).and_then(Value::as_str).map(str::to_owned);
        Some(SavedFilters {
            term: field("term"),
            region: field("region"),
        })
    }

    pub fn save_filters(&self, term: &str, region: &str) {
        let result = serde_json::to_string(&FiltersRecord { term, region })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            .and_then(|json| self.set(FILTER_KEY, &json));
        if let Err(e) = result {
            warn!("Failed to save filter preference: {}", e);
        }
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!("Could not read {}: {}", self.path.display(), e);
                }
                return BTreeMap::new();
            }
        };
        match serde_json::from_str::<BTreeMap<String, Value>>(&contents) {
            Ok(entries) => entries
                .into_iter()
                .filter_map(|(k, v)| match v {
                    Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect(),
            Err(e) => {
                debug!("Ignoring malformed preferences file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
