//! Export command implementation

use crate::output::OutputWriter;
use anyhow::Result;
use mapty_core::config::LayeredConfig;

use super::open_app;

/// Print the collection exactly as it is persisted
pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let app = open_app(config)?;
    let blob = app.store().serialize()?;
    let records: serde_json::Value = serde_json::from_str(&blob)?;

    if output.is_json() {
        output.result(records)
    } else {
        output.data(&records)
    }
}
