//! Wire text protocol spoken by the compilation backend.
//!
//! Every inbound message is plain text. The first line is a verb, the
//! remaining lines are its payload:
//!
//! ```text
//! connection established
//! connection failed
//! error\n<message lines...>
//! success\n<result handle>
//! warning\n<message>
//! ```
//!
//! Outbound messages are the raw source text, unframed.

pub const CONNECTION_ESTABLISHED: &str = "connection established";
pub const CONNECTION_FAILED: &str = "connection failed";
pub const ERROR_VERB: &str = "error";
pub const SUCCESS_VERB: &str = "success";
pub const WARNING_VERB: &str = "warning";

/// A parsed inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    ConnectionEstablished,
    ConnectionFailed,
    /// Compilation failed; payload lines joined with `\n`.
    Error(String),
    /// Compilation succeeded; carries the result handle.
    Success(String),
    Warning(String),
    /// Any verb or payload shape outside the protocol, kept verbatim.
    Unrecognized(String),
}

impl ServerMessage {
    /// Parse one inbound message. Never fails: unknown shapes become
    /// [`ServerMessage::Unrecognized`] holding the original text.
    pub fn parse(raw: &str) -> Self {
        let body = strip_line_ending(raw);
        let mut lines = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        let verb = lines.next().unwrap_or_default();
        let payload: Vec<&str> = lines.collect();

        match (verb, payload.as_slice()) {
            (CONNECTION_ESTABLISHED, []) => ServerMessage::ConnectionEstablished,
            (CONNECTION_FAILED, []) => ServerMessage::ConnectionFailed,
            (ERROR_VERB, message) => ServerMessage::Error(message.join("\n")),
            (SUCCESS_VERB, [handle]) => ServerMessage::Success((*handle).to_string()),
            (WARNING_VERB, [warning]) => ServerMessage::Warning((*warning).to_string()),
            _ => ServerMessage::Unrecognized(raw.to_string()),
        }
    }
}

/// Drop a single trailing `\n` or `\r\n`.
fn strip_line_ending(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}
