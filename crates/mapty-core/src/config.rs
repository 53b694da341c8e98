use crate::error::{MaptyError, Result};
use crate::models::Coords;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::view::DEFAULT_ZOOM;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the JSON data file
pub const DEFAULT_DATA_FILE: &str = "mapty.json";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Mapty
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Key the workout collection is persisted under
    pub storage_key: ConfigValue<String>,
    /// Zoom level used when the map opens and when panning to a workout
    pub map_zoom: ConfigValue<u8>,
    /// JSON file backing the persistent key-value store
    pub data_file: ConfigValue<PathBuf>,
    /// Position reported by the fixed geolocation provider
    pub home: ConfigValue<Option<Coords>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            storage_key: ConfigValue::new(DEFAULT_STORAGE_KEY.to_string(), ConfigSource::Default),
            map_zoom: ConfigValue::new(DEFAULT_ZOOM, ConfigSource::Default),
            data_file: ConfigValue::new(PathBuf::from(DEFAULT_DATA_FILE), ConfigSource::Default),
            home: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| MaptyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| MaptyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(storage_key) = file_config.storage_key {
            self.storage_key.update(parse_storage_key(&storage_key)?, ConfigSource::File);
        }

        if let Some(map_zoom) = file_config.map_zoom {
            self.map_zoom.update(validate_zoom(map_zoom)?, ConfigSource::File);
        }

        if let Some(data_file) = file_config.data_file {
            self.data_file.update(data_file, ConfigSource::File);
        }

        if let Some(home) = file_config.home {
            home.validate().map_err(|e| MaptyError::ConfigInvalid {
                key: "home".to_string(),
                reason: e.to_string(),
            })?;
            self.home.update(Some(home), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // MAPTY_STORAGE_KEY
        if let Ok(key) = env::var("MAPTY_STORAGE_KEY") {
            match parse_storage_key(&key) {
                Ok(key) => self.storage_key.update(key, ConfigSource::Environment),
                Err(_) => tracing::warn!("Ignoring empty MAPTY_STORAGE_KEY"),
            }
        }

        // MAPTY_MAP_ZOOM
        if let Ok(zoom_str) = env::var("MAPTY_MAP_ZOOM") {
            match parse_zoom(&zoom_str) {
                Ok(zoom) => self.map_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid MAPTY_MAP_ZOOM value '{}': expected an integer between 1 and 20",
                    zoom_str
                ),
            }
        }

        // MAPTY_DATA_FILE
        if let Ok(data_file) = env::var("MAPTY_DATA_FILE") {
            self.data_file.update(PathBuf::from(data_file), ConfigSource::Environment);
        }

        // MAPTY_HOME
        if let Ok(home_str) = env::var("MAPTY_HOME") {
            match home_str.parse::<Coords>() {
                Ok(home) => self.home.update(Some(home), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid MAPTY_HOME value '{}': expected 'lat,lng'",
                    home_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(storage_key) = overrides.storage_key {
            self.storage_key.update(storage_key, ConfigSource::Cli);
        }

        if let Some(map_zoom) = overrides.map_zoom {
            self.map_zoom.update(map_zoom, ConfigSource::Cli);
        }

        if let Some(data_file) = overrides.data_file {
            self.data_file.update(data_file, ConfigSource::Cli);
        }

        if let Some(home) = overrides.home {
            self.home.update(Some(home), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "storage_key".to_string(),
            (self.storage_key.value.clone(), self.storage_key.source),
        );

        map.insert("map_zoom".to_string(), (self.map_zoom.value.to_string(), self.map_zoom.source));

        map.insert(
            "data_file".to_string(),
            (self.data_file.value.display().to_string(), self.data_file.source),
        );

        map.insert(
            "home".to_string(),
            (
                self.home.value.map(|c| c.to_string()).unwrap_or_else(|| "(unset)".to_string()),
                self.home.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    storage_key: Option<String>,
    map_zoom: Option<u8>,
    data_file: Option<PathBuf>,
    home: Option<Coords>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub storage_key: Option<String>,
    pub map_zoom: Option<u8>,
    pub data_file: Option<PathBuf>,
    pub home: Option<Coords>,
}

/// Parse a map zoom level from string
pub fn parse_zoom(s: &str) -> Result<u8> {
    let zoom = s.trim().parse::<u8>().map_err(|_| MaptyError::ConfigInvalid {
        key: "map_zoom".to_string(),
        reason: format!("Invalid zoom level: {}. Use an integer between 1 and 20", s),
    })?;
    validate_zoom(zoom)
}

fn validate_zoom(zoom: u8) -> Result<u8> {
    if (1..=20).contains(&zoom) {
        Ok(zoom)
    } else {
        Err(MaptyError::ConfigInvalid {
            key: "map_zoom".to_string(),
            reason: format!("Zoom level {} is outside 1..=20", zoom),
        })
    }
}

fn parse_storage_key(s: &str) -> Result<String> {
    let key = s.trim();
    if key.is_empty() {
        return Err(MaptyError::ConfigInvalid {
            key: "storage_key".to_string(),
            reason: "Storage key must not be empty".to_string(),
        });
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.storage_key.value, "workouts");
        assert_eq!(config.storage_key.source, ConfigSource::Default);
        assert_eq!(config.map_zoom.value, 13);
        assert_eq!(config.data_file.value, PathBuf::from("mapty.json"));
        assert_eq!(config.home.value, None);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
storage_key = "my-workouts"
map_zoom = 15
data_file = "/var/lib/mapty/data.json"
home = [52.52, 13.405]
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.storage_key.value, "my-workouts");
        assert_eq!(config.storage_key.source, ConfigSource::File);
        assert_eq!(config.map_zoom.value, 15);
        assert_eq!(config.data_file.value, PathBuf::from("/var/lib/mapty/data.json"));
        assert_eq!(config.home.value, Some(Coords::new(52.52, 13.405)));
        assert_eq!(config.home.source, ConfigSource::File);
    }

    #[test]
    fn test_load_from_file_rejects_bad_zoom() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "map_zoom = 42").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, MaptyError::ConfigInvalid { ref key, .. } if key == "map_zoom"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            map_zoom: Some(10),
            home: Some(Coords::new(1.0, 2.0)),
            ..Default::default()
        };

        config.update_from_cli(overrides);

        assert_eq!(config.map_zoom.value, 10);
        assert_eq!(config.map_zoom.source, ConfigSource::Cli);
        assert_eq!(config.home.value, Some(Coords::new(1.0, 2.0)));
        // These should still be defaults
        assert_eq!(config.storage_key.source, ConfigSource::Default);
        assert_eq!(config.data_file.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("13").unwrap(), 13);
        assert_eq!(parse_zoom(" 1 ").unwrap(), 1);
        assert!(parse_zoom("0").is_err());
        assert!(parse_zoom("21").is_err());
        assert!(parse_zoom("close").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("storage_key"));
        assert!(map.contains_key("map_zoom"));
        assert!(map.contains_key("data_file"));

        let (home_value, home_source) = &map["home"];
        assert_eq!(home_value, "(unset)");
        assert_eq!(*home_source, ConfigSource::Default);
    }
}
