//! Error types for Mapty

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaptyError {
    // Input errors
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    // Lookup errors
    #[error("Workout not found: {id}")]
    NotFound { id: String },

    #[error("Workout id already in use: {id}")]
    DuplicateId { id: String },

    // Geolocation errors
    #[error("Unable to get your location: {reason}")]
    LocationUnavailable { reason: String },

    // Map and form errors
    #[error("Map is not initialized yet")]
    MapNotReady,

    #[error("Cannot {event} while the form is {state}")]
    InvalidTransition { state: String, event: &'static str },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Storage errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MaptyError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        MaptyError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        MaptyError::NotFound { id: id.into() }
    }
}

impl From<serde_json::Error> for MaptyError {
    fn from(e: serde_json::Error) -> Self {
        MaptyError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MaptyError>;
