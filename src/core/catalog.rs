use crate::models::{EligibilityModel, SchemeRecord};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the scheme catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog must be a JSON array of schemes")]
    NotAnArray,
}

/// Immutable, ordered collection of scheme records
///
/// Built once at startup and shared as `Arc<SchemeCatalog>`. A reload
/// publishes a new snapshot instead of mutating this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeCatalog {
    records: Vec<SchemeRecord>,
}

impl SchemeCatalog {
    pub fn from_records(records: Vec<SchemeRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from a JSON array
    ///
    /// Records are read one at a time. A record that cannot be read keeps its
    /// place in the catalog with an empty rule, so it never matches.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries = match serde_json::from_str::<Value>(json)? {
            Value::Array(entries) => entries,
            _ => return Err(CatalogError::NotAnArray),
        };

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| record_from_value(index, entry))
            .collect();

        Ok(Self { records })
    }

    /// Load a catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;

        tracing::info!(
            "Loaded {} schemes from {}",
            catalog.len(),
            path.display()
        );

        Ok(catalog)
    }

    pub fn records(&self) -> &[SchemeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn record_from_value(index: usize, entry: Value) -> SchemeRecord {
    match serde_json::from_value::<SchemeRecord>(entry.clone()) {
        Ok(record) => record,
        Err(e) => {
            let mut details = match entry {
                Value::Object(map) => map,
                _ => serde_json::Map::new(),
            };
            let title = match details.remove("title") {
                Some(Value::String(title)) => title,
                _ => String::new(),
            };
            details.remove("eligibility");
            details.remove("EligibilityModel");

            tracing::warn!(
                "Scheme #{} ({:?}) is malformed and will never match: {}",
                index,
                title,
                e
            );

            SchemeRecord {
                title,
                eligibility: EligibilityModel::default(),
                details,
            }
        }
    }
}

impl<'a> IntoIterator for &'a SchemeCatalog {
    type Item = &'a SchemeRecord;
    type IntoIter = std::slice::Iter<'a, SchemeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
