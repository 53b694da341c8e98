//! Command implementations

mod add;
mod config;
mod edit;
mod export;
mod list;
mod reset;
mod show;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::map::TerminalMap;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use mapty_core::config::LayeredConfig;
use mapty_core::{App, MapView, WorkoutStore};
use mapty_store::JsonFileStore;

/// The application wired to the CLI adapters
pub type CliApp = App<JsonFileStore, TerminalMap>;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Add(args) => add::execute(args, &config, &output),
        Commands::List => list::execute(&config, &output),
        Commands::Edit(args) => edit::execute(args, &config, &output),
        Commands::Show(args) => show::execute(args, &config, &output),
        Commands::Export => export::execute(&config, &output),
        Commands::Reset(args) => reset::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}

/// Load stored workouts and wire them to a fresh terminal map
pub fn open_app(config: &LayeredConfig) -> Result<CliApp> {
    let data_file = &config.data_file.value;
    let store = WorkoutStore::load(JsonFileStore::open(data_file), config.storage_key.value.clone())
        .with_context(|| format!("Failed to load workouts from {}", data_file.display()))?;

    tracing::debug!("Loaded {} workouts from {}", store.len(), data_file.display());

    let map = MapView::new(TerminalMap::new(), config.map_zoom.value);
    Ok(App::new(store, map))
}
