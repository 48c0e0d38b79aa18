//! Startup wiring: directories, logging, config, then the session runtime.

use crate::cli::Args;
use crate::error::CliError;
use crate::logger::initialize as LoggerInitialize;

use client_core::config::{ClientConfig, default_config_dir, load_dotenv};
use client_core::editor::FileEditor;
use client_core::render::{Renderer, TerminalRenderer};
use client_core::runtime::SessionRuntime;
use client_core::transport::WsTransport;

use common::ErrorLocation;
use models::Session;

use std::fs::create_dir_all;
use std::future::Future;
use std::path::{Path, PathBuf};

use log::info;

const LOG_DIR_NAME: &str = "logs";

/// Where config is read from and logs are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// Resolve directories from arguments, falling back to platform defaults.
#[track_caller]
pub fn resolve_dirs(args: &Args) -> Result<Dirs, CliError> {
    let config_dir = match args.config_dir {
        Some(ref dir) => dir.clone(),
        None => default_config_dir().ok_or_else(|| CliError::Client {
            message: String::from("No platform config directory; pass --config-dir"),
            location: ErrorLocation::caller(),
        })?,
    };

    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join(LOG_DIR_NAME));

    Ok(Dirs {
        config_dir,
        log_dir,
    })
}

/// Load config with `.env`, environment and `--backend` overrides applied, in that order.
pub fn load_config(args: &Args, config_dir: &Path) -> Result<ClientConfig, CliError> {
    load_dotenv();

    let mut config = ClientConfig::load(config_dir)?;
    config.apply_env_overrides()?;

    if let Some(ref backend) = args.backend {
        info!("Backend address overridden by --backend: {backend}");
        config.backend.address = backend.clone();
        config.validate()?;
    }

    Ok(config)
}

/// Run one session against `config`, watching `source`, until the editor
/// stops or `shutdown` resolves.
pub async fn run_session<R, F>(
    config: &ClientConfig,
    source: &Path,
    renderer: R,
    shutdown: F,
) -> Result<Session, CliError>
where
    R: Renderer,
    F: Future<Output = ()>,
{
    let (transport, socket_events) = WsTransport::new();
    let runtime = SessionRuntime::from_config(config, transport, renderer)?;
    let edits = FileEditor::new(source, config.editor_poll_interval()?).spawn();

    info!(
        "Watching {} and compiling on {}",
        source.display(),
        config.backend.address
    );

    Ok(runtime.run(socket_events, edits, shutdown).await?)
}

/// Full startup, as the binary runs it.
pub async fn run<F>(args: Args, shutdown: F) -> Result<Session, CliError>
where
    F: Future<Output = ()>,
{
    let dirs = resolve_dirs(&args)?;

    create_dir_all(&dirs.log_dir).map_err(|e| CliError::Client {
        message: format!(
            "Failed to create log directory {}: {e}",
            dirs.log_dir.display()
        ),
        location: ErrorLocation::caller(),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&dirs.log_dir, args.log_level())?;

    info!("Compile client starting");
    info!("Config directory: {}", dirs.config_dir.display());
    info!("Log directory: {}", dirs.log_dir.display());

    let config = load_config(&args, &dirs.config_dir)?;

    run_session(&config, &args.source, TerminalRenderer::stdout(), shutdown).await
}
