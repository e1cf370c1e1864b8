//! Locale store: read-only mapping from dotted keys to localized values.
//!
//! Keys look like `diseases.Sugarcane___Red_Rot.treatment`; each dot-separated
//! segment walks one level into a nested JSON document.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::report::catalog;

/// Anything that can answer a dotted-key lookup.
pub trait LocaleLookup: Send + Sync {
    /// Value reached by walking `segments` in order. Segments are taken
    /// verbatim, so a segment may itself contain dots.
    fn lookup_path(&self, segments: &[&str]) -> Option<&Value>;

    /// Value stored under `dotted_key`, or `None` when any segment is missing.
    fn lookup(&self, dotted_key: &str) -> Option<&Value> {
        let segments: Vec<&str> = dotted_key.split('.').collect();
        self.lookup_path(&segments)
    }
}

/// JSON-backed locale document.
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    root: Value,
}

impl LocaleStore {
    /// Store that answers nothing; every lookup falls through to the result's own text.
    pub fn empty() -> Self {
        Self { root: Value::Null }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// English text from the built-in disease catalogue.
    pub fn builtin() -> Self {
        Self::from_value(catalog::to_locale_document())
    }

    /// Load a locale JSON file (e.g. `locales/hi.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ReportError::LocaleLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let root = serde_json::from_str(&contents).map_err(|e| ReportError::LocaleLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Loaded locale file {}", path.display());
        Ok(Self::from_value(root))
    }

    /// Overlay `other` on top of this store. Objects merge key by key,
    /// anything else in `other` replaces what was here.
    pub fn overlay(mut self, other: LocaleStore) -> Self {
        merge(&mut self.root, other.root);
        self
    }
}

fn merge(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base_map), Value::Object(top_map)) => {
            for (key, value) in top_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

impl LocaleLookup for LocaleStore {
    fn lookup_path(&self, segments: &[&str]) -> Option<&Value> {
        segments
            .iter()
            .try_fold(&self.root, |node, segment| node.get(*segment))
    }
}
