//! Client session status.

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::Serialize;

/// Why the session is in the [`Session::Problem`] state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum ProblemDetail {
    /// The backend rejected the source, or reported a warning.
    CompilationError(String),

    /// The socket could not be opened or was lost.
    ConnectionFailed,

    /// A frame arrived that could not be decoded as text.
    MessageDecodeFailure(String),

    /// A text frame arrived whose verb or shape is not part of the protocol.
    UnexpectedMessage(String),
}

impl ProblemDetail {
    /// Short heading used by renderers and logs.
    pub fn title(&self) -> &'static str {
        match self {
            ProblemDetail::CompilationError(_) => "Compilation error",
            ProblemDetail::ConnectionFailed => "Connection failed",
            ProblemDetail::MessageDecodeFailure(_) => "Could not decode message",
            ProblemDetail::UnexpectedMessage(_) => "Unexpected message",
        }
    }
}

impl Display for ProblemDetail {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match self {
            ProblemDetail::CompilationError(message) => {
                write!(formatter, "{}: {message}", self.title())
            }
            ProblemDetail::ConnectionFailed => write!(formatter, "{}", self.title()),
            ProblemDetail::MessageDecodeFailure(details) => {
                write!(formatter, "{}: {details}", self.title())
            }
            ProblemDetail::UnexpectedMessage(raw) => {
                write!(formatter, "{}: {raw:?}", self.title())
            }
        }
    }
}

/// The one current connection/compile status of the client.
///
/// Starts as [`Session::Disconnected`] and is only ever replaced by the
/// transition function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data")]
pub enum Session {
    #[default]
    Disconnected,
    Connected,
    Compiling,
    /// Compilation succeeded; holds the result handle addressing the artifact.
    Running(String),
    Problem(ProblemDetail),
}

impl Session {
    /// True only while the retry timer should be firing.
    pub fn awaiting_reconnect(&self) -> bool {
        matches!(self, Session::Problem(ProblemDetail::ConnectionFailed))
    }
}

impl Display for Session {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match self {
            Session::Disconnected => write!(formatter, "disconnected"),
            Session::Connected => write!(formatter, "connected"),
            Session::Compiling => write!(formatter, "compiling"),
            Session::Running(handle) => write!(formatter, "running {handle}"),
            Session::Problem(detail) => write!(formatter, "problem ({})", detail.title()),
        }
    }
}
