//! Turning a session into something to show.

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::io::{Stdout, Write, stdout};

use models::{ProblemDetail, Session};

use log::warn;
use url::Url;

const DISCONNECTED_TEXT: &str = "Connecting to the compilation server...";
const CONNECTED_TEXT: &str = "Connected. Waiting for changes.";
const COMPILING_TEXT: &str = "Compiling...";
const CONNECTION_FAILED_TEXT: &str =
    "Could not reach the compilation server. Retrying automatically.";
const UNEXPECTED_MESSAGE_PREFIX: &str = "The server sent a message this client does not understand:";

/// What the screen should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// One-line status text.
    Status(String),

    /// The running artifact, embedded by URL.
    Frame { url: String },

    /// A problem, with a heading and a free-form body.
    ErrorBlock { title: String, body: String },
}

impl View {
    /// Build the view for `session`. Result handles are resolved against
    /// `frame_base`.
    pub fn from_session(session: &Session, frame_base: &Url) -> Self {
        match session {
            Session::Disconnected => View::Status(DISCONNECTED_TEXT.to_string()),
            Session::Connected => View::Status(CONNECTED_TEXT.to_string()),
            Session::Compiling => View::Status(COMPILING_TEXT.to_string()),
            Session::Running(handle) => View::Frame {
                url: frame_url(frame_base, handle),
            },
            Session::Problem(detail) => View::ErrorBlock {
                title: detail.title().to_string(),
                body: problem_body(detail),
            },
        }
    }
}

/// Append the handle to the base path as one percent-encoded segment. The
/// handle is opaque data and never resolved as a relative reference.
fn frame_url(frame_base: &Url, handle: &str) -> String {
    if matches!(handle, "" | "." | "..") {
        warn!("Result handle {handle:?} cannot address a frame under {frame_base}");
        return handle.to_string();
    }

    let mut url = frame_base.clone();
    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments.pop_if_empty().push(handle);
        }
        Err(()) => {
            warn!("Frame base {frame_base} cannot carry a path, showing bare handle");
            return handle.to_string();
        }
    }

    url.to_string()
}

fn problem_body(detail: &ProblemDetail) -> String {
    match detail {
        ProblemDetail::CompilationError(message) => message.clone(),
        ProblemDetail::ConnectionFailed => CONNECTION_FAILED_TEXT.to_string(),
        ProblemDetail::MessageDecodeFailure(details) => details.clone(),
        ProblemDetail::UnexpectedMessage(raw) => format!("{UNEXPECTED_MESSAGE_PREFIX}\n{raw}"),
    }
}

impl Display for View {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match self {
            View::Status(text) => write!(formatter, "* {text}"),
            View::Frame { url } => write!(formatter, "> Running at {url}"),
            View::ErrorBlock { title, body } => {
                write!(formatter, "!! {title}")?;
                for line in body.lines() {
                    write!(formatter, "\n   | {line}")?;
                }
                Ok(())
            }
        }
    }
}

/// Rendering collaborator.
pub trait Renderer {
    fn render(&mut self, view: &View);
}

/// Prints each new view as text, skipping repeats of the last one.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last: Option<View>,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &View) {
        if self.last.as_ref() == Some(view) {
            return;
        }

        if let Err(e) = writeln!(self.out, "{view}").and_then(|_| self.out.flush()) {
            warn!("Failed to render view: {e}");
            return;
        }

        self.last = Some(view.clone());
    }
}
