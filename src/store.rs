//! Snapshot persistence
//!
//! A stored snapshot is always the complete result of one crawl; writing a
//! new one replaces the previous snapshot outright rather than merging dates.

use crate::error::{CrawlError, Result};
use crate::model::DateAvailability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// The availability captured by one crawl and when it finished
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredSnapshot {
    pub crawled_at: DateTime<Utc>,
    pub availability: DateAvailability,
}

impl StoredSnapshot {
    pub fn new(availability: DateAvailability) -> Self {
        Self { crawled_at: Utc::now(), availability }
    }

    /// Total number of open-slot entries across all dates
    pub fn slot_count(&self) -> usize {
        self.availability.values().map(|slots| slots.len()).sum()
    }
}

/// Where crawl results are kept between runs
pub trait AvailabilityStore: Send + Sync {
    /// Replace whatever is stored with `snapshot`
    fn replace_all(&self, snapshot: &StoredSnapshot) -> Result<()>;

    /// The most recent snapshot, if one was ever written
    fn load(&self) -> Result<Option<StoredSnapshot>>;
}

/// Stores the snapshot as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl AvailabilityStore for JsonFileStore {
    fn replace_all(&self, snapshot: &StoredSnapshot) -> Result<()> {
        let dir = self.directory();
        std::fs::create_dir_all(dir)
            .map_err(|e| CrawlError::Storage(format!("Failed to create {}: {}", dir.display(), e)))?;

        // Each writer stages into its own uniquely named file next to the target
        let mut staging = NamedTempFile::new_in(dir)
            .map_err(|e| CrawlError::Storage(format!("Failed to create staging file in {}: {}", dir.display(), e)))?;
        serde_json::to_writer_pretty(&mut staging, snapshot)
            .map_err(|e| CrawlError::Storage(format!("Failed to write snapshot: {}", e)))?;
        staging
            .persist(&self.path)
            .map_err(|e| CrawlError::Storage(format!("Failed to replace {}: {}", self.path.display(), e.error)))?;

        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSnapshot>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CrawlError::Storage(format!("Failed to read {}: {}", self.path.display(), e))),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| CrawlError::Storage(format!("Failed to parse {}: {}", self.path.display(), e)))
    }
}

/// In-memory store, for tests and one-off runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<StoredSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AvailabilityStore for MemoryStore {
    fn replace_all(&self, snapshot: &StoredSnapshot) -> Result<()> {
        let mut slot = self.snapshot.lock().map_err(|e| CrawlError::Storage(e.to_string()))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSnapshot>> {
        let slot = self.snapshot.lock().map_err(|e| CrawlError::Storage(e.to_string()))?;
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeAvailability;

    fn snapshot(dates: Vec<(&str, Vec<(&str, u32)>)>) -> StoredSnapshot {
        let availability = dates
            .into_iter()
            .map(|(date, slots)| {
                let slots: TimeAvailability = slots.into_iter().map(|(time, courts)| (time.to_string(), courts)).collect();
                (date.to_string(), slots)
            })
            .collect();
        StoredSnapshot::new(availability)
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("availability.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_replaces_not_merges() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("availability.json"));

        let first = snapshot(vec![("2025-03-01", vec![("5:00pm", 2)]), ("2025-03-02", vec![("6:00pm", 1)])]);
        store.replace_all(&first).unwrap();
        assert_eq!(store.load().unwrap(), Some(first));

        let second = snapshot(vec![("2025-03-02", vec![("7:00pm", 3)])]);
        store.replace_all(&second).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, second);
        assert!(!loaded.availability.contains_key("2025-03-01"));
        assert_eq!(std::fs::read_dir(dir.path().join("nested")).unwrap().count(), 1);
    }

    #[test]
    fn test_file_store_overlapping_writers() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("availability.json"));
        let first = snapshot(vec![("2025-03-01", vec![("5:00pm", 2)])]);
        let second = snapshot(vec![("2025-03-02", vec![("6:00pm", 1)])]);

        std::thread::scope(|scope| {
            for stored in [&first, &second] {
                let store = &store;
                scope.spawn(move || {
                    for _ in 0..25 {
                        store.replace_all(stored).unwrap();
                    }
                });
            }
        });

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded == first || loaded == second);
        // Only the snapshot itself is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("availability.json");
        std::fs::write(&path, "{").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CrawlError::Storage(_)));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let stored = snapshot(vec![("2025-03-01", vec![("5:00pm", 2), ("6:00pm", 0)])]);
        store.replace_all(&stored).unwrap();
        assert_eq!(store.load().unwrap().unwrap().slot_count(), 2);
    }
}
