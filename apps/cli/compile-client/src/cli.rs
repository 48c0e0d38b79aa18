//! Command-line arguments.

use crate::logger::DEFAULT_LOG_LEVEL;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

pub const CONFIG_DIR_ENV: &str = "COMPILE_CLIENT_CONFIG_DIR";

#[derive(Debug, Parser)]
#[command(name = "compile-client")]
#[command(
    author,
    version,
    about = "Watches a source file and compiles it live on a remote compilation server"
)]
pub struct Args {
    /// Source file to watch; every saved change is sent for compilation
    pub source: PathBuf,

    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, env = CONFIG_DIR_ENV)]
    pub config_dir: Option<PathBuf>,

    /// Directory for compile-client.log (defaults to <config-dir>/logs)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Backend WebSocket address, overriding config and environment
    #[arg(short, long)]
    pub backend: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }

        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
