//! Logging for the compile client.
//!
//! Provides dual output (stderr with colors + file) with thread-safe initialization.
//! Stdout is left to the renderer, so the console side only shows warnings and errors.

use crate::error::CliError;

use common::ErrorLocation;

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Log file name.
pub const LOG_FILE_NAME: &str = "compile-client.log";

/// Message logged when logger is successfully initialized.
const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

/// Warning message when logger is called multiple times.
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Most verbose level the console dispatch shows.
const CONSOLE_LEVEL_CAP: LevelFilter = LevelFilter::Warn;

/// Default log level for debug builds.
#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize the logger with dual output (stderr + file).
///
/// This function is safe to call multiple times - subsequent calls will
/// log a warning and return Ok. The actual initialization runs exactly once.
///
/// # Arguments
///
/// * `log_dir` - Directory where the log file will be created
/// * `level` - Level for the file; the console is capped at `Warn`
///
/// # Errors
///
/// Returns an error if:
/// - Log file cannot be created
/// - Logger dispatch configuration fails
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), CliError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build_dispatch(log_dir, level).and_then(apply);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{level:?}");
        }
    });

    result
}

/// Console level for a chosen file level.
pub fn console_level(level: LevelFilter) -> LevelFilter {
    level.min(CONSOLE_LEVEL_CAP)
}

/// Build the dual dispatch without installing it.
#[track_caller]
pub(crate) fn build_dispatch(log_dir: &Path, level: LevelFilter) -> Result<Dispatch, CliError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    // Color configuration for the console
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let base_dispatch = Dispatch::new().level(level);

    let console_dispatch = Dispatch::new()
        .level(console_level(level))
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stderr());

    // File dispatch (plain text, no colors)
    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(
            fern::log_file(&log_file_path).map_err(|e| CliError::Logger {
                message: format!("Failed to create log file {}: {e}", log_file_path.display()),
                location: ErrorLocation::caller(),
            })?,
        );

    Ok(base_dispatch.chain(console_dispatch).chain(file_dispatch))
}

#[track_caller]
fn apply(dispatch: Dispatch) -> Result<(), CliError> {
    dispatch.apply().map_err(|e| CliError::Logger {
        message: format!("Failed to initialize logger: {e}"),
        location: ErrorLocation::caller(),
    })
}
