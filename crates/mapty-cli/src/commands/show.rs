//! Show command implementation

use crate::cli::ShowArgs;
use crate::geolocation::FixedLocation;
use crate::output::OutputWriter;
use crate::output_types::{ShowOutput, WorkoutOutput};
use anyhow::Result;
use mapty_core::config::LayeredConfig;
use mapty_core::view::to_list_item;

use super::open_app;

pub fn execute(args: ShowArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut app = open_app(config)?;

    // The workout is still shown when the map cannot be opened
    if let Err(e) = app.start(&FixedLocation::new(config.home.value)) {
        tracing::debug!("Map not opened: {}", e);
    }

    app.select_workout(&args.id)?;
    app.cancel();

    let workout = app.store().get(&args.id)?;
    let map = app.map().adapter();

    if output.is_json() {
        return output.result(ShowOutput {
            workout: WorkoutOutput::from(workout),
            item: to_list_item(workout),
            map_center: map.center(),
            map_zoom: map.zoom(),
        });
    }

    let item = to_list_item(workout);
    output.section(&item.title);
    output.kv("ID", workout.id());
    output.kv("Logged", workout.created_at().format("%Y-%m-%d %H:%M:%S UTC"));
    output.kv("Location", workout.coords());
    for detail in [&item.distance, &item.duration, &item.metric, &item.extra] {
        output.kv(detail.icon, format!("{} {}", detail.value, detail.unit));
    }
    if let (Some(center), Some(zoom)) = (map.center(), map.zoom()) {
        output.info(format!("Map centered on {} at zoom {}", center, zoom));
    }

    Ok(())
}
