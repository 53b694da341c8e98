//! List command implementation

use crate::output::OutputWriter;
use crate::output_types::WorkoutRow;
use anyhow::Result;
use mapty_core::config::LayeredConfig;

use super::open_app;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let app = open_app(config)?;
    let items = app.list_items();

    if output.is_json() {
        return output.result(items);
    }

    let rows: Vec<WorkoutRow> = items.iter().map(WorkoutRow::from).collect();
    output.table(rows)
}
