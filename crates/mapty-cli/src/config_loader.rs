//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use mapty_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "mapty.toml";

/// Build the layered configuration: defaults, file, environment, then flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_file(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides(cli));
    Ok(config)
}

/// An explicit path must exist; the default file is optional
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

fn overrides(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        storage_key: None,
        map_zoom: cli.zoom,
        data_file: cli.data_file.clone(),
        home: cli.home,
    }
}
