//! Ordered workout collection bound to a key-value persistence adapter.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{MaptyError, Result};
use crate::models::{Workout, WorkoutPatch, WorkoutRecord};
use crate::ports::KeyValueStore;

/// Default key the collection is stored under
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

/// In-memory workout collection with write-through persistence
///
/// Insertion order is display order. Every successful mutation is persisted
/// before it returns; if persisting fails the in-memory change is undone.
pub struct WorkoutStore<P> {
    workouts: Vec<Workout>,
    persistence: P,
    key: String,
}

impl<P: KeyValueStore> WorkoutStore<P> {
    /// Load the collection stored under `key`, or start empty
    pub fn load(persistence: P, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let workouts = match persistence.get(&key)? {
            Some(blob) => deserialize(&blob)?,
            None => Vec::new(),
        };

        debug!("Loaded {} workouts from '{}'", workouts.len(), key);

        Ok(Self {
            workouts,
            persistence,
            key,
        })
    }

    /// Append a workout and persist the collection
    pub fn add(&mut self, workout: Workout) -> Result<&Workout> {
        if self.find_by_id(workout.id().as_str()).is_some() {
            return Err(MaptyError::DuplicateId {
                id: workout.id().to_string(),
            });
        }

        self.workouts.push(workout);
        if let Err(e) = self.persist() {
            self.workouts.pop();
            return Err(e);
        }

        let added = &self.workouts[self.workouts.len() - 1];
        debug!("Added {} workout {}", added.kind(), added.id());
        Ok(added)
    }

    /// Linear scan by id
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id().as_str() == id)
    }

    /// Like [`find_by_id`](Self::find_by_id), but absence is an error
    pub fn get(&self, id: &str) -> Result<&Workout> {
        self.find_by_id(id).ok_or_else(|| MaptyError::not_found(id))
    }

    /// Apply a validated patch to one workout and persist the collection
    pub fn edit_in_place(&mut self, id: &str, patch: &WorkoutPatch) -> Result<&Workout> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id().as_str() == id)
            .ok_or_else(|| MaptyError::not_found(id))?;

        let mut candidate = self.workouts[index].clone();
        candidate.apply(patch)?;

        let previous = std::mem::replace(&mut self.workouts[index], candidate);
        if let Err(e) = self.persist() {
            self.workouts[index] = previous;
            return Err(e);
        }

        debug!("Edited workout {}", id);
        Ok(&self.workouts[index])
    }

    /// Serialize the full ordered collection
    pub fn serialize(&self) -> Result<String> {
        serialize(&self.workouts)
    }

    /// Clear persisted state and give the adapter back for a fresh load
    pub fn reset(mut self) -> Result<P> {
        self.persistence.remove(&self.key)?;
        debug!("Removed persisted workouts under '{}'", self.key);
        Ok(self.persistence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn into_persistence(self) -> P {
        self.persistence
    }

    fn persist(&mut self) -> Result<()> {
        let blob = self.serialize()?;
        self.persistence.set(&self.key, &blob)
    }
}

/// Serialize workouts as a JSON array of tagged records
pub fn serialize(workouts: &[Workout]) -> Result<String> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse a serialized collection, rebuilding each variant from its tag
///
/// A malformed blob is an error. Individual records that parse but fail
/// validation, or repeat an id already loaded, are skipped with a warning.
pub fn deserialize(blob: &str) -> Result<Vec<Workout>> {
    let records: Vec<WorkoutRecord> = serde_json::from_str(blob)?;

    let mut workouts = Vec::with_capacity(records.len());
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id().clone();
        if seen.contains(&id) {
            warn!("Skipping stored workout {}: duplicate id", id);
            continue;
        }
        match Workout::try_from(record) {
            Ok(workout) => {
                seen.insert(id);
                workouts.push(workout);
            }
            Err(e) => warn!("Skipping stored workout {}: {}", id, e),
        }
    }

    Ok(workouts)
}

impl<P> std::fmt::Debug for WorkoutStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutStore")
            .field("key", &self.key)
            .field("workouts", &self.workouts)
            .finish_non_exhaustive()
    }
}
