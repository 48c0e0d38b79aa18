use common::ErrorLocation;

use std::error::Error as StdError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum WsError {
    #[error("Request Error: {message} {location}")]
    Request {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Event Channel Closed Error: {message} {location}")]
    EventChannelClosed {
        message: String,
        location: ErrorLocation,
    },
}
