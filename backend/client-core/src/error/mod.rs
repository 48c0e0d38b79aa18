pub mod config;
pub mod runtime;
pub mod ws;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Ws(#[from] ws::WsError),

    #[error(transparent)]
    Runtime(#[from] runtime::RuntimeError),
}
