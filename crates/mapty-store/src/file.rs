//! JSON file key-value storage.
//!
//! The file holds one JSON object mapping keys to string values. Every write
//! rewrites the whole file through a temporary sibling and a rename, so a
//! crash mid-write leaves the previous contents in place.

use mapty_core::error::{MaptyError, Result};
use mapty_core::ports::KeyValueStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed implementation of KeyValueStore
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            MaptyError::Persistence(format!(
                "Data file {} is not a JSON object of strings: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapty_core::{Coords, Workout, WorkoutInput, WorkoutPatch, WorkoutStore};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json"));

        assert_eq!(store.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_set_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("mapty.json");
        let mut store = JsonFileStore::open(&path);

        store.set("workouts", "[]").unwrap();
        assert!(path.exists());
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[]"));

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["workouts"], "[]");
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("mapty.json"));

        store.set("workouts", "[1]").unwrap();
        store.set("other", "x").unwrap();
        store.remove("workouts").unwrap();

        assert_eq!(store.get("workouts").unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));

        // Absent key
        store.remove("workouts").unwrap();
    }

    #[test]
    fn test_corrupt_file_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapty.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(matches!(store.get("workouts"), Err(MaptyError::Persistence(_))));
    }

    #[test]
    fn test_workouts_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapty.json");

        let id = {
            let mut store = WorkoutStore::load(JsonFileStore::open(&path), "workouts").unwrap();
            let workout =
                Workout::create(Coords::new(40.7, -74.0), WorkoutInput::running(5.0, 26.0, 178.0))
                    .unwrap();
            let id = store.add(workout).unwrap().id().clone();
            store
                .edit_in_place(
                    id.as_str(),
                    &WorkoutPatch {
                        distance: Some(10.0),
                        ..Default::default()
                    },
                )
                .unwrap();
            id
        };

        let store = WorkoutStore::load(JsonFileStore::open(&path), "workouts").unwrap();
        let workout = store.get(id.as_str()).unwrap();
        assert_eq!(workout.distance(), 10.0);
        assert_eq!(workout.pace(), Some(2.6));
    }
}
