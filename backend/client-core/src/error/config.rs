use std::path::PathBuf;

use common::ErrorLocation;
use models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    #[track_caller]
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            location: ErrorLocation::caller(),
            reason: reason.into(),
        }
    }
}

impl From<ModelError> for ConfigError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ConfigError::validation(error.to_string())
    }
}
