use client_core::error::CoreError;
use client_core::error::runtime::RuntimeError;
use client_core::error::ws::WsError;
use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies transport errors pass through the runtime and core errors unchanged.
///
/// **WHY THIS MATTERS**: The binary prints `CoreError`; wrapping must not hide the
/// original message or location.
///
/// **BUG THIS CATCHES**: Would catch if `#[error(transparent)]` is replaced by a wrapper
/// message that drops the inner text.
#[test]
#[track_caller]
fn given_ws_error_when_wrapped_twice_then_display_is_unchanged() {
    // GIVEN
    let inner = WsError::EventChannelClosed {
        message: String::from("Socket event receiver dropped"),
        location: ErrorLocation::from(Location::caller()),
    };
    let expected = inner.to_string();

    // WHEN
    let core = CoreError::from(RuntimeError::from(inner));

    // THEN
    assert_eq!(core.to_string(), expected);
    assert!(matches!(
        core,
        CoreError::Runtime(RuntimeError::Transport(WsError::EventChannelClosed { .. }))
    ));
}
