//! # Manifest Module
//!
//! Reads the site's trip manifest (`{ "data": [ ... ] }`) and indexes it by
//! trip key.
//!
//! Loading never fails: a missing, blank or broken manifest is treated as an
//! empty one so a scan can still propose every trip as new.

mod record;

pub use record::{display_name, ManifestRecord};

use crate::error::ManifestError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    data: Vec<ManifestRecord>,
}

/// The recorded trips, indexed by `year_country`
#[derive(Debug, Default)]
pub struct Manifest {
    records: Vec<ManifestRecord>,
    index: HashMap<String, usize>,
}

impl Manifest {
    /// A manifest with no trips
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index records by key; a later record replaces an earlier one with the same key
    pub fn from_records(records: Vec<ManifestRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            if index.insert(record.key(), position).is_some() {
                warn!(key = %record.key(), "Duplicate trip in manifest, keeping the later entry");
            }
        }

        Self { records, index }
    }

    /// Parse manifest JSON; blank input is an empty manifest
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        if text.trim().is_empty() {
            return Ok(Self::empty());
        }

        let document: ManifestDocument =
            serde_json::from_str(text).map_err(|source| ManifestError::Parse { source })?;

        Ok(Self::from_records(document.data))
    }

    /// Read and parse a manifest file
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Read a manifest file, recovering any problem as an empty manifest
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "No manifest found, treating every trip as new");
            return Self::empty();
        }

        match Self::read(path) {
            Ok(manifest) => {
                info!(path = %path.display(), trips = manifest.len(), "Manifest loaded");
                manifest
            }
            Err(e) => {
                warn!("{}; continuing with an empty manifest", e);
                Self::empty()
            }
        }
    }

    /// Look up the record for a trip key
    pub fn get(&self, key: &str) -> Option<&ManifestRecord> {
        self.index.get(key).map(|&position| &self.records[position])
    }

    /// Whether a trip key is recorded
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// One record per key, in manifest order
    pub fn trips(&self) -> impl Iterator<Item = (String, &ManifestRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter_map(move |(position, record)| {
                let key = record.key();
                if self.index.get(&key) == Some(&position) {
                    Some((key, record))
                } else {
                    debug!(key = %key, "Skipping shadowed manifest entry");
                    None
                }
            })
    }

    /// Number of distinct trips
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no trips are recorded
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SAMPLE: &str = r#"{
        "data": [
            { "year": "2024", "country": "Japan", "city": [], "photo": ["hokkaido_01", "hokkaido_02"] },
            { "year": "2023", "country": ["Spain", "Portugal"], "city": "madrid", "photo": ["madrid_01"] }
        ]
    }"#;

    #[test]
    fn from_json_indexes_by_key() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();

        assert_eq!(manifest.len(), 2);
        assert!(manifest.contains("2024_Japan"));
        assert_eq!(manifest.get("2023_Spain_Portugal").unwrap().city, vec!["madrid"]);
        assert!(manifest.get("2023_Spain").is_none());
    }

    #[test]
    fn blank_text_is_empty_manifest() {
        assert!(Manifest::from_json("  \n").unwrap().is_empty());
    }

    #[test]
    fn missing_data_key_is_empty_manifest() {
        assert!(Manifest::from_json(r#"{ "version": 2 }"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let result = Manifest::from_json("{ \"data\": [ ");
        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn later_duplicate_wins() {
        let manifest = Manifest::from_json(
            r#"{ "data": [
                { "year": "2024", "country": "Japan", "photo": ["a_1"] },
                { "year": "2024", "country": "Japan", "photo": ["b_1"] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("2024_Japan").unwrap().photo, vec!["b_1"]);
        let trips: Vec<_> = manifest.trips().collect();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].1.photo, vec!["b_1"]);
    }

    #[test]
    fn load_missing_file_recovers_empty() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = Manifest::load(&temp_dir.path().join("travels.json"));
        assert!(manifest.is_empty());
    }

    #[test]
    fn load_broken_file_recovers_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json at all").unwrap();

        assert!(Manifest::read(file.path()).is_err());
        assert!(Manifest::load(file.path()).is_empty());
    }

    #[test]
    fn load_reads_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        assert_eq!(Manifest::load(file.path()).len(), 2);
    }
}
