//! Presentational forms of a workout: map markers and list items.
//!
//! `marker_for` and `to_list_item` are pure. `MapView` owns the map adapter
//! and knows whether the map has been initialized; it is the only place
//! markers are placed or the view is panned.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Activity, Coords, Workout, WorkoutId, WorkoutKind};
use crate::ports::{MapAdapter, MapHandle, PanOptions};

/// Default zoom level for the map
pub const DEFAULT_ZOOM: u8 = 13;

/// Map marker for one workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub workout_id: WorkoutId,
    pub coords: Coords,
    /// Popup style class, keyed by workout kind
    pub style_class: String,
    /// Popup content
    pub popup: String,
}

/// One labelled value in a list item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// Side-list view model for one workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub distance: Detail,
    pub duration: Detail,
    /// Pace or speed, one decimal place
    pub metric: Detail,
    /// Cadence or elevation gain
    pub extra: Detail,
}

pub fn kind_icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

pub fn marker_for(workout: &Workout) -> Marker {
    Marker {
        workout_id: workout.id().clone(),
        coords: workout.coords(),
        style_class: format!("{}-popup", workout.kind()),
        popup: workout.description().to_string(),
    }
}

pub fn to_list_item(workout: &Workout) -> ListItem {
    let kind = workout.kind();

    let (metric, extra) = match *workout.activity() {
        Activity::Running { cadence, pace } => (
            Detail {
                icon: "⚡️",
                value: format!("{:.1}", pace),
                unit: "min/km",
            },
            Detail {
                icon: "🦶🏼",
                value: format_number(cadence),
                unit: "spm",
            },
        ),
        Activity::Cycling {
            elevation_gain,
            speed,
        } => (
            Detail {
                icon: "⚡️",
                value: format!("{:.1}", speed),
                unit: "km/h",
            },
            Detail {
                icon: "⛰",
                value: format_number(elevation_gain),
                unit: "m",
            },
        ),
    };

    ListItem {
        id: workout.id().clone(),
        kind,
        title: workout.description().to_string(),
        distance: Detail {
            icon: kind_icon(kind),
            value: format_number(workout.distance()),
            unit: "km",
        },
        duration: Detail {
            icon: "⏱",
            value: format_number(workout.duration()),
            unit: "min",
        },
        metric,
        extra,
    }
}

/// User-entered numbers print as entered: no trailing ".0"
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Map adapter plus its readiness state
pub struct MapView<M> {
    adapter: M,
    handle: Option<MapHandle>,
    zoom: u8,
}

impl<M: MapAdapter> MapView<M> {
    pub fn new(adapter: M, zoom: u8) -> Self {
        Self {
            adapter,
            handle: None,
            zoom,
        }
    }

    /// Render the basemap centered on `center`
    pub fn init(&mut self, center: Coords) -> Result<MapHandle> {
        let handle = self.adapter.init(center, self.zoom)?;
        info!("Map initialized at {} (zoom {})", center, self.zoom);
        self.handle = Some(handle);
        Ok(handle)
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Build the marker and place it when the map is ready
    ///
    /// Placement is not deduplicated: calling this twice for the same
    /// workout places two markers.
    pub fn to_marker(&mut self, workout: &Workout) -> Result<Marker> {
        let marker = marker_for(workout);
        if let Some(handle) = self.handle {
            self.adapter.place_marker(handle, &marker)?;
            debug!("Placed marker for {}", marker.workout_id);
        }
        Ok(marker)
    }

    /// Replace the marker of an edited workout
    pub fn refresh_marker(&mut self, workout: &Workout) -> Result<Marker> {
        if let Some(handle) = self.handle {
            self.adapter.remove_marker(handle, workout.id())?;
        }
        self.to_marker(workout)
    }

    /// Animated pan to the workout; no-op until the map is initialized
    pub fn move_to(&mut self, workout: &Workout) -> Result<()> {
        let Some(handle) = self.handle else {
            debug!("Map not ready, ignoring move to {}", workout.id());
            return Ok(());
        };

        self.adapter
            .pan_to(handle, workout.coords(), self.zoom, PanOptions::default())
    }

    pub fn adapter(&self) -> &M {
        &self.adapter
    }

    pub fn into_adapter(self) -> M {
        self.adapter
    }
}
