use client_core::error::CoreError;
use client_core::error::config::ConfigError;
use client_core::error::runtime::RuntimeError;

use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

/// Errors that stop the client.
///
/// Printed for the user on exit, and logged as tagged JSON so the log file
/// keeps the variant and location in a machine-readable form.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CliError {
    /// Error from this binary (directories, arguments)
    #[error("Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },

    /// Logger could not be set up
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core operations (config, transport, runtime)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for CliError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        CliError::Core {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        CliError::from(CoreError::from(error))
    }
}

impl From<RuntimeError> for CliError {
    #[track_caller]
    fn from(error: RuntimeError) -> Self {
        CliError::from(CoreError::from(error))
    }
}
