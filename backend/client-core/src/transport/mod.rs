//! Socket transport capability.
//!
//! The runtime never talks to a socket directly. It hands [`SocketCommand`]s
//! to a [`SocketTransport`] and receives [`SocketEvent`]s on a channel the
//! transport feeds. Tests substitute a recording transport; production uses
//! [`WsTransport`].

pub(crate) mod ws;

pub use ws::WsTransport;

use crate::error::ws::WsError;
use crate::session::Event;

use models::SocketTarget;

/// Outbound instruction for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketCommand {
    /// Open (or reopen) the socket described by the target.
    Connect(SocketTarget),

    /// Write `content` as one text message on the socket called `name`.
    Send { name: String, content: String },
}

/// Inbound notification from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Connected,
    Message(String),
    DecodeError(String),
}

impl From<SocketEvent> for Event {
    fn from(event: SocketEvent) -> Self {
        match event {
            SocketEvent::Connected => Event::SocketConnected,
            SocketEvent::Message(text) => Event::SocketMessage(text),
            SocketEvent::DecodeError(details) => Event::SocketDecodeError(details),
        }
    }
}

/// Executes socket commands without blocking the caller.
///
/// Outcomes (open, data, failure) come back later as [`SocketEvent`]s, never
/// as return values; an `Err` here means the transport itself is unusable.
pub trait SocketTransport {
    fn execute(&mut self, command: SocketCommand) -> Result<(), WsError>;
}
