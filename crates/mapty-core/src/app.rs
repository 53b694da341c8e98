//! Application state: the store, the map view, and the add/edit form.
//!
//! `App` is constructed once by the host and receives every user or map
//! event as a method call. All operations run to completion; a failed
//! operation leaves the previous state in place.

use std::fmt;

use tracing::{info, warn};

use crate::error::{MaptyError, Result};
use crate::models::{Coords, Workout, WorkoutId, WorkoutInput, WorkoutPatch};
use crate::ports::{GeolocationProvider, KeyValueStore, MapAdapter};
use crate::store::WorkoutStore;
use crate::view::{self, ListItem, MapView};

/// State of the add/edit form
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    /// Opened by a map click at `coords`
    OpenForAdd { coords: Coords },
    /// Opened by selecting an existing workout
    OpenForEdit { id: WorkoutId },
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::Closed => write!(f, "closed"),
            FormState::OpenForAdd { .. } => write!(f, "open for add"),
            FormState::OpenForEdit { id } => write!(f, "open for editing {}", id),
        }
    }
}

/// What a successful submit did
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Added(WorkoutId),
    Edited(WorkoutId),
}

pub struct App<P, M> {
    store: WorkoutStore<P>,
    map: MapView<M>,
    form: FormState,
}

impl<P: KeyValueStore, M: MapAdapter> App<P, M> {
    pub fn new(store: WorkoutStore<P>, map: MapView<M>) -> Self {
        Self {
            store,
            map,
            form: FormState::Closed,
        }
    }

    /// Look up the current position and bring the map up there
    ///
    /// Markers for workouts loaded before the map was ready are placed here.
    /// On failure the map stays uninitialized; the list remains usable.
    pub fn start(&mut self, geolocation: &dyn GeolocationProvider) -> Result<()> {
        let position = geolocation.current_position().inspect_err(|e| {
            warn!("{}", e);
        })?;

        self.map.init(position)?;
        for workout in self.store.iter() {
            self.map.to_marker(workout)?;
        }

        info!("Rendered {} stored workouts on the map", self.store.len());
        Ok(())
    }

    /// A click on the map opens the form for a new workout at that spot
    pub fn handle_map_click(&mut self, coords: Coords) -> Result<()> {
        if !self.map.is_ready() {
            return Err(MaptyError::MapNotReady);
        }

        match self.form {
            FormState::Closed | FormState::OpenForAdd { .. } => {
                coords.validate()?;
                self.form = FormState::OpenForAdd { coords };
                Ok(())
            }
            FormState::OpenForEdit { .. } => Err(self.invalid("open a new workout")),
        }
    }

    /// Selecting a list entry pans to it and opens it for editing
    ///
    /// Returns the workout's current values to prefill the form.
    pub fn select_workout(&mut self, id: &str) -> Result<WorkoutInput> {
        let workout = self.store.get(id)?;
        self.map.move_to(workout)?;

        let input = workout.input();
        self.form = FormState::OpenForEdit {
            id: workout.id().clone(),
        };
        Ok(input)
    }

    /// Submit the open form
    ///
    /// On validation or persistence failure the form stays open and the
    /// error is returned. Once the store has committed, marker placement is
    /// best-effort: an adapter error is logged and the submit still succeeds.
    pub fn submit(&mut self, input: WorkoutInput) -> Result<Submitted> {
        let submitted = match &self.form {
            FormState::Closed => return Err(self.invalid("submit")),
            FormState::OpenForAdd { coords } => {
                let workout = Workout::create(*coords, input)?;
                let added = self.store.add(workout)?;
                if let Err(e) = self.map.to_marker(added) {
                    warn!("Saved workout {} but could not place its marker: {}", added.id(), e);
                }
                Submitted::Added(added.id().clone())
            }
            FormState::OpenForEdit { id } => {
                let patch = WorkoutPatch::from(input);
                let edited = self.store.edit_in_place(id.as_str(), &patch)?;
                if let Err(e) = self.map.refresh_marker(edited) {
                    warn!("Saved edit to {} but could not refresh its marker: {}", edited.id(), e);
                }
                Submitted::Edited(edited.id().clone())
            }
        };

        self.form = FormState::Closed;
        Ok(submitted)
    }

    pub fn cancel(&mut self) {
        self.form = FormState::Closed;
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn store(&self) -> &WorkoutStore<P> {
        &self.store
    }

    pub fn map(&self) -> &MapView<M> {
        &self.map
    }

    /// List view models in insertion order
    pub fn list_items(&self) -> Vec<ListItem> {
        self.store.iter().map(view::to_list_item).collect()
    }

    /// Clear persisted state and hand the adapters back for a fresh start
    pub fn reset(self) -> Result<(P, M)> {
        let persistence = self.store.reset()?;
        info!("Workouts reset");
        Ok((persistence, self.map.into_adapter()))
    }

    fn invalid(&self, event: &'static str) -> MaptyError {
        MaptyError::InvalidTransition {
            state: self.form.to_string(),
            event,
        }
    }
}
