use chrono::{DateTime, Utc};
use mapty_core::config::ConfigSource;
use mapty_core::view::{Detail, ListItem};
use mapty_core::{Activity, Coords, Marker, Workout, WorkoutKind};
use serde::Serialize;
use tabled::Tabled;

/// Full view of one workout
#[derive(Debug, Serialize)]
pub struct WorkoutOutput {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for WorkoutOutput {
    fn from(workout: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match *workout.activity() {
            Activity::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            Activity::Cycling {
                elevation_gain,
                speed,
            } => (None, None, Some(elevation_gain), Some(speed)),
        };

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            description: workout.description().to_string(),
            created_at: workout.created_at(),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

/// Output for add command
#[derive(Debug, Serialize)]
pub struct AddOutput {
    pub workout: WorkoutOutput,
    pub marker: Marker,
}

/// Output for edit command
#[derive(Debug, Serialize)]
pub struct EditOutput {
    pub workout: WorkoutOutput,
    pub marker: Marker,
}

/// Output for show command
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub workout: WorkoutOutput,
    pub item: ListItem,
    /// Map view after panning, if the map could be opened
    pub map_center: Option<Coords>,
    pub map_zoom: Option<u8>,
}

/// One row of the workout list
#[derive(Debug, Serialize, Tabled)]
pub struct WorkoutRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Workout")]
    pub title: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[tabled(rename = "Pace/Speed")]
    pub metric: String,
    #[tabled(rename = "Cadence/Elev")]
    pub extra: String,
}

impl From<&ListItem> for WorkoutRow {
    fn from(item: &ListItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            distance: detail(&item.distance),
            duration: detail(&item.duration),
            metric: detail(&item.metric),
            extra: detail(&item.extra),
        }
    }
}

fn detail(d: &Detail) -> String {
    format!("{} {} {}", d.icon, d.value, d.unit)
}

/// Output for reset command
#[derive(Debug, Serialize)]
pub struct ResetOutput {
    pub storage_key: String,
    pub removed: usize,
}

/// One effective configuration value
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source", display_with = "source_label")]
    pub source: ConfigSource,
}

fn source_label(source: &ConfigSource) -> String {
    format!("{:?}", source)
}
