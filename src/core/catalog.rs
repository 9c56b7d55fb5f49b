//! Hazard catalog - the static reference table of workplace hazards
//!
//! The catalog maps keys of the form `"<ordinal>. <category name>"` to a
//! description and a set of hazardous events, each event carrying its
//! recommended mitigation measures. It is built once at startup and never
//! mutated; components that validate hazard/event choices receive it by
//! reference.
//!
//! The default definition ships embedded in the binary; an alternative
//! JSON file can override it. An unreadable or empty definition degrades
//! to a single placeholder category so the tool stays usable.

use indexmap::IndexMap;
use rust_embed::Embed;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Embed)]
#[folder = "catalog/"]
struct EmbeddedCatalog;

const DEFAULT_DEFINITION: &str = "hazards.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One hazard category from the definition file
#[derive(Debug, Clone, Deserialize)]
pub struct HazardEntry {
    /// Ordinal number as a digit string
    #[serde(rename = "No")]
    pub no: String,
    /// Category description
    pub desc: String,
    /// Event name -> ordered mitigation measures
    pub events: IndexMap<String, Vec<String>>,
}

/// Immutable hazard reference table
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: IndexMap<String, HazardEntry>,
}

impl Catalog {
    /// Build from a raw JSON definition string
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let entries: IndexMap<String, HazardEntry> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    /// Build from a definition file on disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The definition embedded in the binary
    pub fn embedded() -> Self {
        EmbeddedCatalog::get(DEFAULT_DEFINITION)
            .and_then(|file| std::str::from_utf8(&file.data).ok().map(str::to_string))
            .and_then(|content| Self::from_json(&content).ok())
            .filter(|catalog| !catalog.is_empty())
            .unwrap_or_else(Self::placeholder)
    }

    /// Load from an optional override path. An unreadable or empty
    /// override degrades to the placeholder; without an override the
    /// embedded definition is used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::from_path(p)
                .ok()
                .filter(|catalog| !catalog.is_empty())
                .unwrap_or_else(Self::placeholder),
            None => Self::embedded(),
        }
    }

    /// Single synthetic entry used when no definition is available
    pub fn placeholder() -> Self {
        let mut events = IndexMap::new();
        events.insert(
            "Hazardous event".to_string(),
            vec!["Mitigation measure".to_string()],
        );
        let mut entries = IndexMap::new();
        entries.insert(
            "1. Hazard".to_string(),
            HazardEntry {
                no: "1".to_string(),
                desc: "Hazard".to_string(),
                events,
            },
        );
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Hazard keys in definition order
    pub fn hazards(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn get(&self, key: &str) -> Option<&HazardEntry> {
        self.entries.get(key)
    }

    /// Ordinal and key for a known hazard
    pub fn hazard_info<'a>(&'a self, key: &'a str) -> Option<(&'a str, &'a str)> {
        self.entries.get(key).map(|e| (e.no.as_str(), key))
    }

    pub fn description_of(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.desc.as_str())
    }

    /// Event names for a hazard, empty when the key is unknown
    pub fn events_for(&self, key: &str) -> Vec<&str> {
        self.entries
            .get(key)
            .map(|e| e.events.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Mitigation measures for a (hazard, event) pair, empty when either
    /// part is unknown
    pub fn measures_for(&self, key: &str, event: &str) -> &[String] {
        self.entries
            .get(key)
            .and_then(|e| e.events.get(event))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
