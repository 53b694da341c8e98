use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::coords::Coords;
use crate::error::{MaptyError, Result};

/// Unique identifier for a workout
///
/// Opaque string. New ids are time-ordered random UUIDs; ids loaded from
/// older data keep whatever shape they had.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh id from the current time and a random source
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload with its derived metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters, negative for a net descent
        elevation_gain: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

impl Activity {
    fn derive(input: ActivityInput, distance: f64, duration: f64) -> Self {
        match input {
            ActivityInput::Running { cadence } => Activity::Running {
                cadence,
                pace: duration / distance,
            },
            ActivityInput::Cycling { elevation_gain } => Activity::Cycling {
                elevation_gain,
                speed: distance / (duration / 60.0),
            },
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The user-entered part of the payload, without the derived metric
    pub fn input(&self) -> ActivityInput {
        match *self {
            Activity::Running { cadence, .. } => ActivityInput::Running { cadence },
            Activity::Cycling { elevation_gain, .. } => ActivityInput::Cycling { elevation_gain },
        }
    }
}

/// User-entered type-specific field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivityInput {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl ActivityInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            ActivityInput::Running { .. } => WorkoutKind::Running,
            ActivityInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            ActivityInput::Running { cadence } => require_positive("cadence", cadence),
            ActivityInput::Cycling { elevation_gain } => {
                require_finite("elevation gain", elevation_gain)
            }
        }
    }
}

/// Values submitted through the add/edit form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutInput {
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    pub activity: ActivityInput,
}

impl WorkoutInput {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self {
            distance,
            duration,
            activity: ActivityInput::Running { cadence },
        }
    }

    pub fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self {
            distance,
            duration,
            activity: ActivityInput::Cycling { elevation_gain },
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("distance", self.distance)?;
        require_positive("duration", self.duration)?;
        self.activity.validate()
    }
}

/// Partial update applied by the edit path
///
/// Missing fields keep their current value. Supplying an activity of the
/// other kind switches the workout's variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPatch {
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub activity: Option<ActivityInput>,
}

impl From<WorkoutInput> for WorkoutPatch {
    fn from(input: WorkoutInput) -> Self {
        Self {
            distance: Some(input.distance),
            duration: Some(input.duration),
            activity: Some(input.activity),
        }
    }
}

/// A logged workout
///
/// Identity (`id`, `created_at`, `coords`) is fixed at construction. The
/// derived metric and description are recomputed on every change, so a
/// `Workout` value is always consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    activity: Activity,
    description: String,
}

impl Workout {
    /// Create a workout stamped with a fresh id and the current time
    pub fn create(coords: Coords, input: WorkoutInput) -> Result<Self> {
        Self::create_at(WorkoutId::generate(), Utc::now(), coords, input)
    }

    /// Create a workout with an explicit identity
    pub fn create_at(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        input: WorkoutInput,
    ) -> Result<Self> {
        coords.validate()?;
        input.validate()?;

        let kind = input.activity.kind();
        Ok(Self {
            id,
            created_at,
            coords,
            distance: input.distance,
            duration: input.duration,
            activity: Activity::derive(input.activity, input.distance, input.duration),
            description: describe(kind, created_at),
        })
    }

    /// Apply a patch, validating the merged values before anything changes
    pub fn apply(&mut self, patch: &WorkoutPatch) -> Result<()> {
        let merged = WorkoutInput {
            distance: patch.distance.unwrap_or(self.distance),
            duration: patch.duration.unwrap_or(self.duration),
            activity: patch.activity.unwrap_or_else(|| self.activity.input()),
        };
        merged.validate()?;

        self.distance = merged.distance;
        self.duration = merged.duration;
        self.activity = Activity::derive(merged.activity, merged.distance, merged.duration);
        self.description = describe(self.activity.kind(), self.created_at);
        Ok(())
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current values in form shape, used to prefill the edit form
    pub fn input(&self) -> WorkoutInput {
        WorkoutInput {
            distance: self.distance,
            duration: self.duration,
            activity: self.activity.input(),
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }
}

/// "Running on March 15", using the local calendar date
fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    let local = created_at.with_timezone(&Local);
    format!("{} on {} {}", kind.label(), local.format("%B"), local.day())
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MaptyError::validation(field, "inputs have to be finite numbers"))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(MaptyError::validation(field, "inputs have to be positive numbers"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn expected_description(label: &str) -> String {
        let local = timestamp().with_timezone(&Local);
        format!("{} on {} {}", label, local.format("%B"), local.day())
    }

    fn running() -> Workout {
        Workout::create_at(
            WorkoutId::from("run-1"),
            timestamp(),
            Coords::new(40.7, -74.0),
            WorkoutInput::running(5.0, 25.0, 180.0),
        )
        .unwrap()
    }

    #[test]
    fn test_running_derives_pace_and_description() {
        let workout = running();

        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.pace(), Some(5.0));
        assert_eq!(workout.speed(), None);
        assert_eq!(workout.description(), expected_description("Running"));
    }

    #[test]
    fn test_cycling_derives_speed() {
        let workout = Workout::create_at(
            WorkoutId::from("ride-1"),
            timestamp(),
            Coords::new(46.5, 7.9),
            WorkoutInput::cycling(30.0, 90.0, -250.0),
        )
        .unwrap();

        assert_eq!(workout.speed(), Some(20.0));
        assert_eq!(workout.pace(), None);
        assert_eq!(workout.description(), expected_description("Cycling"));
        assert!(matches!(
            workout.activity(),
            Activity::Cycling { elevation_gain, .. } if *elevation_gain == -250.0
        ));
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        let coords = Coords::new(0.0, 0.0);

        let cases = [
            WorkoutInput::running(-1.0, 25.0, 180.0),
            WorkoutInput::running(5.0, 0.0, 180.0),
            WorkoutInput::running(5.0, 25.0, 0.0),
            WorkoutInput::running(f64::NAN, 25.0, 180.0),
            WorkoutInput::cycling(-1.0, 25.0, 10.0),
            WorkoutInput::cycling(10.0, f64::INFINITY, 10.0),
            WorkoutInput::cycling(10.0, 25.0, f64::NAN),
        ];

        for input in cases {
            let err = Workout::create(coords, input).unwrap_err();
            assert!(matches!(err, MaptyError::Validation { .. }), "{:?}", input);
        }
    }

    #[test]
    fn test_rejects_invalid_coords() {
        let err = Workout::create(Coords::new(120.0, 0.0), WorkoutInput::running(5.0, 25.0, 180.0))
            .unwrap_err();
        assert!(matches!(err, MaptyError::Validation { field: "latitude", .. }));
    }

    #[test]
    fn test_apply_rederives_metric() {
        let mut workout = running();
        let description = workout.description().to_string();

        workout
            .apply(&WorkoutPatch {
                distance: Some(10.0),
                duration: Some(50.0),
                activity: None,
            })
            .unwrap();

        assert_eq!(workout.pace(), Some(5.0));
        assert_eq!(workout.distance(), 10.0);
        assert_eq!(workout.description(), description);

        workout
            .apply(&WorkoutPatch {
                duration: Some(60.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(workout.pace(), Some(6.0));
    }

    #[test]
    fn test_apply_invalid_leaves_workout_untouched() {
        let mut workout = running();
        let before = workout.clone();

        let err = workout
            .apply(&WorkoutPatch {
                distance: Some(12.0),
                duration: Some(-3.0),
                activity: None,
            })
            .unwrap_err();

        assert!(matches!(err, MaptyError::Validation { field: "duration", .. }));
        assert_eq!(workout, before);
    }

    #[test]
    fn test_apply_can_switch_kind() {
        let mut workout = running();

        workout
            .apply(&WorkoutInput::cycling(20.0, 60.0, 120.0).into())
            .unwrap();

        assert_eq!(workout.kind(), WorkoutKind::Cycling);
        assert_eq!(workout.speed(), Some(20.0));
        assert_eq!(workout.description(), expected_description("Cycling"));
        assert_eq!(workout.id().as_str(), "run-1");
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(WorkoutId::generate(), WorkoutId::generate());
    }
}
