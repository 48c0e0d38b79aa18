use crate::backend_tests::helpers::to_wire;

use client_core::protocol::ServerMessage;

/// **VALUE**: Verifies that what the fake backend sends parses back to the same message.
///
/// **WHY THIS MATTERS**: Transport and runtime tests build backend replies with `to_wire`;
/// if it disagrees with `parse`, those tests exercise the wrong shapes.
///
/// **BUG THIS CATCHES**: Would catch if a verb constant is misspelled in one direction.
#[test]
fn given_server_messages_when_written_by_backend_then_client_parses_same_message() {
    // GIVEN
    let messages = [
        ServerMessage::ConnectionEstablished,
        ServerMessage::ConnectionFailed,
        ServerMessage::Error(String::from("line 1\nline 2")),
        ServerMessage::Error(String::new()),
        ServerMessage::Success(String::from("h1")),
        ServerMessage::Warning(String::from("careful")),
    ];

    // WHEN / THEN
    for message in messages {
        assert_eq!(ServerMessage::parse(&to_wire(&message)), message);
    }
}
