//! Add command implementation

use crate::cli::{AddArgs, KindArg};
use crate::errors;
use crate::geolocation::FixedLocation;
use crate::output::OutputWriter;
use crate::output_types::{AddOutput, WorkoutOutput};
use anyhow::Result;
use mapty_core::config::LayeredConfig;
use mapty_core::view::marker_for;
use mapty_core::{Submitted, WorkoutInput};

use super::open_app;

pub fn execute(args: AddArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let input = form_input(&args)?;
    let mut app = open_app(config)?;

    // Without a configured home the map opens on the workout itself
    let location = FixedLocation::new(config.home.value).or(args.at);
    app.start(&location)?;

    app.handle_map_click(args.at)?;
    let (Submitted::Added(id) | Submitted::Edited(id)) = app.submit(input)?;

    let workout = app.store().get(id.as_str())?;

    if output.is_json() {
        output.result(AddOutput {
            workout: WorkoutOutput::from(workout),
            marker: marker_for(workout),
        })?;
    } else {
        output.success(format!("Logged: {}", workout.description()));
        output.kv("ID", workout.id());
        output.kv("Location", workout.coords());
        if let Some(pace) = workout.pace() {
            output.kv("Pace", format!("{:.1} min/km", pace));
        }
        if let Some(speed) = workout.speed() {
            output.kv("Speed", format!("{:.1} km/h", speed));
        }
        output.kv("Workouts", app.store().len());
        output.kv("Markers on map", app.map().adapter().markers().len());
    }

    Ok(())
}

/// Map the flags to form values; the type-specific flag must be present
fn form_input(args: &AddArgs) -> Result<WorkoutInput> {
    let input = match args.kind {
        KindArg::Running => {
            let cadence = args
                .cadence
                .ok_or_else(|| errors::missing_metric("add", "cadence", "running"))?;
            WorkoutInput::running(args.distance, args.duration, cadence)
        }
        KindArg::Cycling => {
            let elevation = args
                .elevation
                .ok_or_else(|| errors::missing_metric("add", "elevation", "cycling"))?;
            WorkoutInput::cycling(args.distance, args.duration, elevation)
        }
    };
    Ok(input)
}
