use crate::error::ws::WsError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RuntimeError {
    #[error(transparent)]
    Transport(#[from] WsError),

    #[error("Channel Closed Error: {message} {location}")]
    ChannelClosed {
        message: String,
        location: ErrorLocation,
    },
}
