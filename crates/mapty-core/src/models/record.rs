//! Persisted shape of a workout.
//!
//! One JSON object per workout, tagged by `type`. Derived values (`pace`,
//! `speed`, `description`) are written for readers of the raw blob but are
//! recomputed on load, so the in-memory `Workout` never trusts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coords::Coords;
use super::workout::{Activity, Workout, WorkoutId, WorkoutInput};
use crate::error::{MaptyError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutRecord {
    Running {
        id: WorkoutId,
        #[serde(rename = "createdAt", alias = "date")]
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
        #[serde(default)]
        pace: Option<f64>,
        #[serde(default)]
        description: Option<String>,
    },
    Cycling {
        id: WorkoutId,
        #[serde(rename = "createdAt", alias = "date")]
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        #[serde(default)]
        speed: Option<f64>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl WorkoutRecord {
    pub fn id(&self) -> &WorkoutId {
        match self {
            WorkoutRecord::Running { id, .. } | WorkoutRecord::Cycling { id, .. } => id,
        }
    }
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let id = workout.id().clone();
        let created_at = workout.created_at();
        let coords = workout.coords();
        let distance = workout.distance();
        let duration = workout.duration();
        let description = Some(workout.description().to_string());

        match *workout.activity() {
            Activity::Running { cadence, pace } => WorkoutRecord::Running {
                id,
                created_at,
                coords,
                distance,
                duration,
                cadence,
                pace: Some(pace),
                description,
            },
            Activity::Cycling {
                elevation_gain,
                speed,
            } => WorkoutRecord::Cycling {
                id,
                created_at,
                coords,
                distance,
                duration,
                elevation_gain,
                speed: Some(speed),
                description,
            },
        }
    }
}

/// Rebuilds the proper variant and re-derives its metric and description
impl TryFrom<WorkoutRecord> for Workout {
    type Error = MaptyError;

    fn try_from(record: WorkoutRecord) -> Result<Self> {
        match record {
            WorkoutRecord::Running {
                id,
                created_at,
                coords,
                distance,
                duration,
                cadence,
                ..
            } => Workout::create_at(
                id,
                created_at,
                coords,
                WorkoutInput::running(distance, duration, cadence),
            ),
            WorkoutRecord::Cycling {
                id,
                created_at,
                coords,
                distance,
                duration,
                elevation_gain,
                ..
            } => Workout::create_at(
                id,
                created_at,
                coords,
                WorkoutInput::cycling(distance, duration, elevation_gain),
            ),
        }
    }
}
