use crate::{ModelError, SocketTargetBuilder};

/// **VALUE**: Verifies that a fully specified builder produces the expected target.
///
/// **WHY THIS MATTERS**: The socket target is what every `Connect` command carries.
/// A builder that mangles a field would point the client at the wrong backend.
///
/// **BUG THIS CATCHES**: Would catch if a `with_*` method stores into the wrong field.
#[test]
fn given_all_fields_when_building_socket_target_then_succeeds() {
    // GIVEN: Builder with every field set
    let builder = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address("ws://127.0.0.1:8080/compile")
        .with_protocol("compile.v1");

    // WHEN: Building
    let target = builder.build().expect("valid target should build");

    // THEN: Fields should be carried through unchanged
    assert_eq!(target.name, "compiler");
    assert_eq!(target.address, "ws://127.0.0.1:8080/compile");
    assert_eq!(target.protocol.as_deref(), Some("compile.v1"));
}

/// **VALUE**: Verifies that the protocol is optional.
///
/// **WHY THIS MATTERS**: Most backends do not negotiate a subprotocol; requiring one
/// would force a bogus value into every config.
///
/// **BUG THIS CATCHES**: Would catch if `protocol` becomes a required field.
#[test]
fn given_no_protocol_when_building_then_protocol_is_none() {
    // GIVEN: Builder without protocol
    let builder = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address("wss://compile.example.com/socket");

    // WHEN: Building
    let target = builder.build().expect("valid target should build");

    // THEN: Protocol should be absent
    assert_eq!(target.protocol, None);
}

/// **VALUE**: Verifies that a missing name is rejected.
///
/// **WHY THIS MATTERS**: `Send` commands are routed by name; a nameless socket could
/// never receive content.
///
/// **BUG THIS CATCHES**: Would catch if required field validation is removed.
#[test]
fn given_missing_name_when_building_then_returns_validation_error() {
    // GIVEN: Builder without name
    let builder = SocketTargetBuilder::default().with_address("ws://localhost:8080");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Socket name is required");
        }
        Ok(target) => panic!("Expected validation error, got {target:?}"),
    }
}

/// **VALUE**: Verifies that an empty name is rejected.
///
/// **WHY THIS MATTERS**: An empty string passes the "is present" check but is just as
/// useless as a missing name.
///
/// **BUG THIS CATCHES**: Would catch if only `None` is checked.
#[test]
fn given_empty_name_when_building_then_returns_validation_error() {
    // GIVEN: Builder with empty name
    let builder = SocketTargetBuilder::default()
        .with_name("")
        .with_address("ws://localhost:8080");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Socket name cannot be empty");
        }
        Ok(target) => panic!("Expected validation error, got {target:?}"),
    }
}

/// **VALUE**: Verifies that non-WebSocket schemes are rejected.
///
/// **WHY THIS MATTERS**: The transport only speaks WebSocket. An `http://` address would
/// fail on every connect attempt and trap the client in a retry loop.
///
/// **BUG THIS CATCHES**: Would catch if the scheme check is removed or loosened.
#[test]
fn given_http_address_when_building_then_returns_validation_error() {
    // GIVEN: Builder with an http address
    let builder = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address("http://localhost:8080");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error naming the address
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("http://localhost:8080"));
        }
        Ok(target) => panic!("Expected validation error, got {target:?}"),
    }
}

/// **VALUE**: Verifies that an empty protocol is rejected.
///
/// **WHY THIS MATTERS**: An empty `Sec-WebSocket-Protocol` header makes the handshake fail
/// with a confusing error deep in the transport.
///
/// **BUG THIS CATCHES**: Would catch if protocol validation is dropped.
#[test]
fn given_empty_protocol_when_building_then_returns_validation_error() {
    // GIVEN: Builder with empty protocol
    let builder = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address("ws://localhost:8080")
        .with_protocol("");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
}

/// **VALUE**: Verifies that validation errors carry a location in their message.
///
/// **WHY THIS MATTERS**: Config loading surfaces these errors to the user; the location
/// tells developers which validation step fired.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` or the location field is lost.
#[test]
fn given_validation_error_when_formatted_then_includes_location() {
    // GIVEN: A failing build
    let err = SocketTargetBuilder::default().build().unwrap_err();

    // WHEN: Formatting
    let formatted = err.to_string();

    // THEN: Should include kind and a bracketed location
    assert!(formatted.starts_with("Validation Error: Socket name is required"));
    assert!(formatted.contains(".rs:"));
}
