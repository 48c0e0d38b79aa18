//! Session state machine.
//!
//! The whole client is driven by [`transition`]: a pure function from the
//! current [`Session`] and one [`Event`] to the next session and an
//! [`Effect`]. Effects are instructions for the runtime; nothing here touches
//! the socket, the clock or the screen.
//!
//! [`SessionCell`] owns the single current session and is the only writer.

mod cell;

pub use cell::SessionCell;

use crate::protocol::ServerMessage;

use models::{ProblemDetail, Session};

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The transport opened the socket.
    SocketConnected,

    /// A text message arrived from the backend.
    SocketMessage(String),

    /// A frame arrived that the transport could not decode.
    SocketDecodeError(String),

    /// The editor replaced the source with this full text.
    EditSubmitted(String),

    /// The fixed-interval retry timer ticked.
    ReconnectTimerFired,

    /// Local request to redraw the current view. Never changes the session.
    Redraw,
}

impl Event {
    /// Variant name, for logging without dumping source text.
    pub fn name(&self) -> &'static str {
        match self {
            Event::SocketConnected => "SocketConnected",
            Event::SocketMessage(_) => "SocketMessage",
            Event::SocketDecodeError(_) => "SocketDecodeError",
            Event::EditSubmitted(_) => "EditSubmitted",
            Event::ReconnectTimerFired => "ReconnectTimerFired",
            Event::Redraw => "Redraw",
        }
    }
}

/// What the runtime must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ConnectSocket,
    SendOverSocket(String),
    NoEffect,
}

/// Compute the next session and the effect to run.
pub fn transition(current: &Session, event: Event) -> (Session, Effect) {
    match event {
        Event::EditSubmitted(source) => (Session::Compiling, Effect::SendOverSocket(source)),

        Event::SocketMessage(raw) => (session_for(ServerMessage::parse(&raw)), Effect::NoEffect),

        Event::SocketDecodeError(details) => (
            Session::Problem(ProblemDetail::MessageDecodeFailure(details)),
            Effect::NoEffect,
        ),

        Event::SocketConnected => {
            let next = match current {
                Session::Disconnected | Session::Problem(ProblemDetail::ConnectionFailed) => {
                    Session::Connected
                }
                other => other.clone(),
            };
            (next, Effect::NoEffect)
        }

        Event::ReconnectTimerFired if current.awaiting_reconnect() => {
            (current.clone(), Effect::ConnectSocket)
        }

        Event::ReconnectTimerFired => (current.clone(), Effect::NoEffect),

        Event::Redraw => (current.clone(), Effect::NoEffect),
    }
}

fn session_for(message: ServerMessage) -> Session {
    match message {
        ServerMessage::ConnectionEstablished => Session::Connected,
        ServerMessage::ConnectionFailed => Session::Problem(ProblemDetail::ConnectionFailed),
        ServerMessage::Error(message) | ServerMessage::Warning(message) => {
            Session::Problem(ProblemDetail::CompilationError(message))
        }
        ServerMessage::Success(handle) => Session::Running(handle),
        ServerMessage::Unrecognized(raw) => Session::Problem(ProblemDetail::UnexpectedMessage(raw)),
    }
}
