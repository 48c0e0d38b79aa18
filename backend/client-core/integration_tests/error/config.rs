use client_core::error::config::ConfigError;
use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::PathBuf;

/// **VALUE**: Verifies that `ConfigError::ReadError` names the file and the call site.
///
/// **WHY THIS MATTERS**: A client that cannot read its config refuses to start. The user
/// needs the path to fix it; developers need the location to see which load path failed.
///
/// **BUG THIS CATCHES**: Would catch if the path or location drops out of the Display
/// implementation, or if the I/O cause is not exposed as `source()`.
#[test]
#[track_caller]
fn given_read_error_when_formatted_then_includes_path_and_location() {
    // GIVEN: A read failure
    let err = ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("/tmp/compile-client/config.json"),
        source: IoError::new(ErrorKind::PermissionDenied, "permission denied"),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.starts_with("Config Read Error"));
    assert!(error_string.contains("config.json"));
    assert!(error_string.contains("permission denied"));
    assert!(error_string.contains("config.rs"));
    assert!(err.source().is_some());
}

/// **VALUE**: Verifies validation errors carry the reason verbatim.
///
/// **WHY THIS MATTERS**: Validation messages (bad URL, empty socket name) are the only
/// hint the user gets about which field to fix.
///
/// **BUG THIS CATCHES**: Would catch if the reason is replaced by a generic message.
#[test]
#[track_caller]
fn given_validation_error_when_formatted_then_includes_reason() {
    // GIVEN
    let err = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("Invalid frame base URL: relative URL without a base"),
    };

    // WHEN
    let error_string = format!("{err}");

    // THEN
    assert!(error_string.contains("Config Validation Error"));
    assert!(error_string.contains("Invalid frame base URL"));
    assert!(err.source().is_none());
}
