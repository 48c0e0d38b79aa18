// Unit tests for inbound message parsing.

use crate::protocol::ServerMessage;

/// **VALUE**: Verifies the two bare connection verbs.
///
/// **WHY THIS MATTERS**: These drive the connection lifecycle. Misreading them leaves the
/// client showing the wrong connectivity status.
///
/// **BUG THIS CATCHES**: Would catch if the verb constants drift from the wire text.
#[test]
fn given_connection_verbs_when_parsed_then_map_to_connection_messages() {
    // GIVEN / WHEN / THEN
    assert_eq!(
        ServerMessage::parse("connection established"),
        ServerMessage::ConnectionEstablished
    );
    assert_eq!(
        ServerMessage::parse("connection failed"),
        ServerMessage::ConnectionFailed
    );
}

/// **VALUE**: Verifies that `error` keeps every payload line.
///
/// **WHY THIS MATTERS**: Compiler diagnostics are multi-line. Dropping or reordering
/// lines makes them unreadable.
///
/// **BUG THIS CATCHES**: Would catch if only the first payload line is kept, or lines are
/// joined with something other than `\n`.
#[test]
fn given_multi_line_error_when_parsed_then_joins_payload_with_newlines() {
    // GIVEN: An error with two lines
    let raw = "error\nfoo\nbar";

    // WHEN: Parsing
    let message = ServerMessage::parse(raw);

    // THEN: Payload lines are joined
    assert_eq!(message, ServerMessage::Error(String::from("foo\nbar")));
}

/// **VALUE**: Verifies that `error` with no payload is still an error.
///
/// **WHY THIS MATTERS**: The protocol allows zero or more lines after `error`; a bare
/// `error` must not be treated as an unknown message.
///
/// **BUG THIS CATCHES**: Would catch if the error arm requires at least one line.
#[test]
fn given_bare_error_when_parsed_then_error_with_empty_message() {
    // GIVEN / WHEN
    let message = ServerMessage::parse("error");

    // THEN
    assert_eq!(message, ServerMessage::Error(String::new()));
}

/// **VALUE**: Verifies that `success` carries its single handle.
///
/// **WHY THIS MATTERS**: The handle addresses the running artifact; a wrong handle
/// embeds someone else's result or nothing at all.
///
/// **BUG THIS CATCHES**: Would catch if the verb line leaks into the handle.
#[test]
fn given_success_with_handle_when_parsed_then_success_with_handle() {
    // GIVEN / WHEN
    let message = ServerMessage::parse("success\nabc123");

    // THEN
    assert_eq!(message, ServerMessage::Success(String::from("abc123")));
}

/// **VALUE**: Verifies that `success` requires exactly one payload line.
///
/// **WHY THIS MATTERS**: Any other shape is a protocol violation and must be shown to the
/// user rather than guessed at.
///
/// **BUG THIS CATCHES**: Would catch if the parser takes the first of several lines or
/// accepts a missing handle.
#[test]
fn given_success_with_wrong_line_count_when_parsed_then_unrecognized() {
    // GIVEN: Zero and two payload lines
    let inputs = ["success", "success\na\nb"];

    // WHEN / THEN: Both are kept verbatim as unrecognized
    for raw in inputs {
        assert_eq!(
            ServerMessage::parse(raw),
            ServerMessage::Unrecognized(raw.to_string())
        );
    }
}

/// **VALUE**: Verifies that `warning` requires exactly one line.
///
/// **WHY THIS MATTERS**: Warnings are single-line by protocol; multi-line warnings are
/// malformed.
///
/// **BUG THIS CATCHES**: Would catch if warning is parsed like error.
#[test]
fn given_warning_shapes_when_parsed_then_only_single_line_is_warning() {
    // GIVEN / WHEN / THEN
    assert_eq!(
        ServerMessage::parse("warning\noops"),
        ServerMessage::Warning(String::from("oops"))
    );
    assert_eq!(
        ServerMessage::parse("warning\na\nb"),
        ServerMessage::Unrecognized(String::from("warning\na\nb"))
    );
}

/// **VALUE**: Verifies that connection verbs with payload are rejected.
///
/// **WHY THIS MATTERS**: `connection established` is only meaningful bare; extra lines
/// mean the sender is speaking some other protocol.
///
/// **BUG THIS CATCHES**: Would catch if only the first line is inspected.
#[test]
fn given_connection_verb_with_payload_when_parsed_then_unrecognized() {
    // GIVEN
    let raw = "connection established\nextra";

    // WHEN / THEN
    assert_eq!(
        ServerMessage::parse(raw),
        ServerMessage::Unrecognized(raw.to_string())
    );
}

/// **VALUE**: Verifies that unknown verbs keep the original text.
///
/// **WHY THIS MATTERS**: No message is ever silently dropped; the user sees exactly what
/// the server sent.
///
/// **BUG THIS CATCHES**: Would catch if the raw text is trimmed or truncated.
#[test]
fn given_unknown_text_when_parsed_then_unrecognized_with_raw_text() {
    // GIVEN: Assorted unknown inputs
    let inputs = ["", "hello", "Success\nabc", " error\nx", "connection  failed"];

    // WHEN / THEN
    for raw in inputs {
        assert_eq!(
            ServerMessage::parse(raw),
            ServerMessage::Unrecognized(raw.to_string()),
            "{raw:?}"
        );
    }
}

/// **VALUE**: Verifies that one trailing line ending is ignored.
///
/// **WHY THIS MATTERS**: Line-oriented backends terminate messages with `\n` or `\r\n`;
/// without this, `success\nabc\n` would look like a two-line payload.
///
/// **BUG THIS CATCHES**: Would catch if CRLF handling leaves `\r` in the handle.
#[test]
fn given_trailing_line_endings_when_parsed_then_ignored() {
    // GIVEN / WHEN / THEN
    assert_eq!(
        ServerMessage::parse("success\nabc\n"),
        ServerMessage::Success(String::from("abc"))
    );
    assert_eq!(
        ServerMessage::parse("success\r\nabc\r\n"),
        ServerMessage::Success(String::from("abc"))
    );
    assert_eq!(
        ServerMessage::parse("connection established\n"),
        ServerMessage::ConnectionEstablished
    );
}
