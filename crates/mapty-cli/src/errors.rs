use console::style;
use mapty_core::MaptyError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a workout id that is not in the store
pub fn workout_not_found(id: &str) -> CliError {
    CliError::new("Workout not found")
        .with_context(format!("No stored workout has this id.\n\nId: {}", id))
        .with_suggestion("List workouts and their ids: mapty list")
        .with_suggestion("Check that --data-file points at the right file")
        .with_help("Run: mapty list --help")
}

/// Create error for rejected form values
pub fn invalid_input(field: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid {}", field))
        .with_context(format!("The workout values were rejected.\n\nReason: {}", reason))
        .with_suggestion("Distance, duration and cadence must be greater than zero")
        .with_suggestion("Elevation gain may be negative but must be a number")
        .with_help("Run: mapty add --help")
}

/// Create error for a type-specific value that was not supplied
pub fn missing_metric(command: &str, flag: &str, kind: &str) -> CliError {
    CliError::new(format!("Missing --{} for a {} workout", flag, kind))
        .with_suggestion(format!("Pass --{} <VALUE>", flag))
        .with_help(format!("Run: mapty {} --help", command))
}

/// Create error for missing position
pub fn location_unavailable(reason: &str) -> CliError {
    CliError::new("Unable to get your location")
        .with_context(format!("The map cannot be opened without a position.\n\nReason: {}", reason))
        .with_suggestion("Pass your position: --home 52.52,13.405")
        .with_suggestion("Or set MAPTY_HOME=\"52.52,13.405\"")
        .with_suggestion("Or add to mapty.toml:\n  home = [52.52, 13.405]")
        .with_help("Run: mapty config")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check mapty.toml for syntax errors")
        .with_suggestion("Check MAPTY_* environment variables")
        .with_help("Run: mapty config")
}

/// Create error for an unreadable data file
pub fn persistence_failed(reason: &str) -> CliError {
    CliError::new("Cannot access stored workouts")
        .with_context(format!("Reading or writing the data file failed.\n\nError: {}", reason))
        .with_suggestion("Check that the data file is valid JSON")
        .with_suggestion("Or point to another file: --data-file other.json")
        .with_help("Run: mapty config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return CliError {
            message: cli_error.message.clone(),
            context: cli_error.context.clone(),
            suggestions: cli_error.suggestions.clone(),
            help_command: cli_error.help_command.clone(),
        };
    }

    let Some(mapty_error) = error.chain().find_map(|e| e.downcast_ref::<MaptyError>()) else {
        return CliError::new(format!("{:#}", error));
    };

    match mapty_error {
        MaptyError::NotFound { id } => workout_not_found(id),
        MaptyError::Validation { field, reason } => invalid_input(field, reason),
        MaptyError::LocationUnavailable { reason } => location_unavailable(reason),
        MaptyError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        MaptyError::Persistence(reason) | MaptyError::Serialization(reason) => {
            persistence_failed(reason)
        }
        MaptyError::Io(e) => persistence_failed(&e.to_string()),
        other => CliError::new(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_maps_domain_errors() {
        let err = anyhow::Error::new(MaptyError::NotFound {
            id: "abc".to_string(),
        });
        let cli = from_anyhow(err);
        assert_eq!(cli.message, "Workout not found");
        assert!(cli.context.unwrap().contains("abc"));
    }

    #[test]
    fn test_finds_domain_error_behind_context() {
        let result: Result<(), MaptyError> = Err(MaptyError::ConfigInvalid {
            key: "map_zoom".to_string(),
            reason: "Zoom level 42 is outside 1..=20".to_string(),
        });
        let err = result.context("Failed to load configuration").unwrap_err();

        let cli = from_anyhow(err);
        assert_eq!(cli.message, "Invalid configuration: map_zoom");
        assert!(!cli.suggestions.is_empty());
    }

    #[test]
    fn test_passes_cli_errors_through() {
        let err = anyhow::Error::new(missing_metric("add", "cadence", "running"));
        let cli = from_anyhow(err);
        assert_eq!(cli.message, "Missing --cadence for a running workout");
        assert_eq!(cli.help_command.as_deref(), Some("Run: mapty add --help"));
    }
}
