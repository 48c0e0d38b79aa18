use client_core::error::ws::WsError;
use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;

/// **VALUE**: Verifies that `WsError::Request` keeps both the message and the cause.
///
/// **WHY THIS MATTERS**: A malformed address or protocol header is rejected before any
/// network traffic. The message says which value was bad; the source says why.
///
/// **BUG THIS CATCHES**: Would catch if the boxed source is lost or the location is
/// missing from the Display output.
#[test]
#[track_caller]
fn given_request_error_when_formatted_then_includes_message_and_source() {
    // GIVEN
    let err = WsError::Request {
        message: String::from("Invalid socket address ws://"),
        location: ErrorLocation::from(Location::caller()),
        source: Box::new(IoError::new(ErrorKind::InvalidInput, "empty host")),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.starts_with("Request Error"));
    assert!(error_string.contains("ws://"));
    assert!(error_string.contains("ws.rs"));
    assert_eq!(
        err.source().map(|source| source.to_string()),
        Some(String::from("empty host"))
    );
}

/// **VALUE**: Verifies the closed event channel error is distinguishable.
///
/// **WHY THIS MATTERS**: This error means the runtime is gone; callers stop instead of
/// retrying.
///
/// **BUG THIS CATCHES**: Would catch if the variant's Display prefix changes silently.
#[test]
#[track_caller]
fn given_event_channel_closed_when_formatted_then_has_distinct_prefix() {
    // GIVEN
    let err = WsError::EventChannelClosed {
        message: String::from("Socket event receiver dropped"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN / THEN
    assert!(err.to_string().starts_with("Event Channel Closed Error"));
}
