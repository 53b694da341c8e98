//! Reset command implementation

use crate::cli::ResetArgs;
use crate::errors::CliError;
use crate::output::OutputWriter;
use crate::output_types::ResetOutput;
use anyhow::Result;
use mapty_core::config::LayeredConfig;

use super::open_app;

pub fn execute(args: ResetArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let app = open_app(config)?;
    let removed = app.store().len();

    if !args.yes {
        return Err(CliError::new("Refusing to delete workouts without confirmation")
            .with_context(format!(
                "This deletes all {} stored workouts under '{}'.",
                removed, config.storage_key.value
            ))
            .with_suggestion("Run again with --yes to confirm")
            .with_help("Run: mapty reset --help")
            .into());
    }

    app.reset()?;

    if output.is_json() {
        output.result(ResetOutput {
            storage_key: config.storage_key.value.clone(),
            removed,
        })?;
    } else {
        output.success(format!("Deleted {} workouts", removed));
    }

    Ok(())
}
