//! Edit command implementation

use crate::cli::EditArgs;
use crate::errors;
use crate::geolocation::FixedLocation;
use crate::output::OutputWriter;
use crate::output_types::{EditOutput, WorkoutOutput};
use anyhow::Result;
use mapty_core::config::LayeredConfig;
use mapty_core::view::marker_for;
use mapty_core::{ActivityInput, WorkoutInput, WorkoutKind};

use super::open_app;

pub fn execute(args: EditArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut app = open_app(config)?;

    if let Some(home) = config.home.value {
        app.start(&FixedLocation::new(Some(home)))?;
    }

    let current = app.select_workout(&args.id)?;

    if is_unchanged(&args) {
        app.cancel();
        output.info("Nothing to change");
        return Ok(());
    }

    let input = merge(current, &args, output)?;
    app.submit(input)?;

    let workout = app.store().get(&args.id)?;

    if output.is_json() {
        output.result(EditOutput {
            workout: WorkoutOutput::from(workout),
            marker: marker_for(workout),
        })?;
    } else {
        output.success(format!("Updated: {}", workout.description()));
        output.kv("Distance", format!("{} km", workout.distance()));
        output.kv("Duration", format!("{} min", workout.duration()));
        if let Some(pace) = workout.pace() {
            output.kv("Pace", format!("{:.1} min/km", pace));
        }
        if let Some(speed) = workout.speed() {
            output.kv("Speed", format!("{:.1} km/h", speed));
        }
    }

    Ok(())
}

fn is_unchanged(args: &EditArgs) -> bool {
    args.kind.is_none()
        && args.distance.is_none()
        && args.duration.is_none()
        && args.cadence.is_none()
        && args.elevation.is_none()
}

/// Prefilled form values with the flags that were given applied on top
///
/// Switching the type needs the new type's value unless the workout
/// already has one.
fn merge(current: WorkoutInput, args: &EditArgs, output: &OutputWriter) -> Result<WorkoutInput> {
    let kind = args
        .kind
        .map(WorkoutKind::from)
        .unwrap_or_else(|| current.activity.kind());

    let activity = match (kind, current.activity) {
        (WorkoutKind::Running, ActivityInput::Running { cadence }) => ActivityInput::Running {
            cadence: args.cadence.unwrap_or(cadence),
        },
        (WorkoutKind::Running, ActivityInput::Cycling { .. }) => ActivityInput::Running {
            cadence: args
                .cadence
                .ok_or_else(|| errors::missing_metric("edit", "cadence", "running"))?,
        },
        (WorkoutKind::Cycling, ActivityInput::Cycling { elevation_gain }) => {
            ActivityInput::Cycling {
                elevation_gain: args.elevation.unwrap_or(elevation_gain),
            }
        }
        (WorkoutKind::Cycling, ActivityInput::Running { .. }) => ActivityInput::Cycling {
            elevation_gain: args
                .elevation
                .ok_or_else(|| errors::missing_metric("edit", "elevation", "cycling"))?,
        },
    };

    match kind {
        WorkoutKind::Running if args.elevation.is_some() => {
            output.warning("--elevation ignored for a running workout")
        }
        WorkoutKind::Cycling if args.cadence.is_some() => {
            output.warning("--cadence ignored for a cycling workout")
        }
        _ => {}
    }

    Ok(WorkoutInput {
        distance: args.distance.unwrap_or(current.distance),
        duration: args.duration.unwrap_or(current.duration),
        activity,
    })
}
