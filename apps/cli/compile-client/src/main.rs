use compile_client::app;
use compile_client::cli::Args;

use std::future::pending;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C, run until the editor stops: {e}");
            pending::<()>().await;
        }
    };

    match app::run(args, shutdown).await {
        Ok(session) => {
            info!("Session ended: {session}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            match serde_json::to_string(&e) {
                Ok(json) => error!("Client stopped: {json}"),
                Err(_) => error!("Client stopped: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}
