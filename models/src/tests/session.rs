use crate::{ProblemDetail, Session};

/// **VALUE**: Verifies that a fresh session starts disconnected.
///
/// **WHY THIS MATTERS**: The runtime issues its initial connect based on this state;
/// any other default would show a wrong status before the socket opens.
///
/// **BUG THIS CATCHES**: Would catch if `#[default]` moves to another variant.
#[test]
fn given_default_session_when_created_then_is_disconnected() {
    // GIVEN / WHEN: Default session
    let session = Session::default();

    // THEN: Should be disconnected
    assert_eq!(session, Session::Disconnected);
}

/// **VALUE**: Verifies that only `Problem(ConnectionFailed)` arms the retry timer.
///
/// **WHY THIS MATTERS**: The runtime polls this to decide whether to fire reconnects.
/// A compile error must not trigger reconnect attempts.
///
/// **BUG THIS CATCHES**: Would catch if `awaiting_reconnect` matches any problem.
#[test]
fn given_each_session_when_awaiting_reconnect_checked_then_only_connection_failed_is_true() {
    // GIVEN: One session of each kind
    let sessions = [
        (Session::Disconnected, false),
        (Session::Connected, false),
        (Session::Compiling, false),
        (Session::Running(String::from("abc")), false),
        (Session::Problem(ProblemDetail::ConnectionFailed), true),
        (
            Session::Problem(ProblemDetail::CompilationError(String::from("x"))),
            false,
        ),
        (
            Session::Problem(ProblemDetail::MessageDecodeFailure(String::from("x"))),
            false,
        ),
        (
            Session::Problem(ProblemDetail::UnexpectedMessage(String::from("x"))),
            false,
        ),
    ];

    // WHEN / THEN: Only ConnectionFailed awaits reconnect
    for (session, expected) in sessions {
        assert_eq!(session.awaiting_reconnect(), expected, "{session:?}");
    }
}

/// **VALUE**: Verifies the serialized shape of a session.
///
/// **WHY THIS MATTERS**: Session snapshots are written to the debug log as JSON; a stable
/// tagged shape keeps them greppable.
///
/// **BUG THIS CATCHES**: Would catch if the serde tag/content attributes are removed.
#[test]
fn given_problem_session_when_serialized_then_uses_tagged_shape() {
    // GIVEN: A compilation error session
    let session = Session::Problem(ProblemDetail::CompilationError(String::from("oops")));

    // WHEN: Serializing
    let json = serde_json::to_string(&session).expect("session should serialize");

    // THEN: Should be tagged at both levels
    assert_eq!(
        json,
        r#"{"state":"Problem","data":{"kind":"CompilationError","detail":"oops"}}"#
    );
}

/// **VALUE**: Verifies that unexpected messages are displayed quoted.
///
/// **WHY THIS MATTERS**: Raw messages may contain newlines or be empty; quoting keeps
/// the one-line status readable and shows empty payloads explicitly.
///
/// **BUG THIS CATCHES**: Would catch if the raw text is printed unescaped.
#[test]
fn given_unexpected_message_when_displayed_then_raw_text_is_quoted() {
    // GIVEN: An unexpected multi-line message
    let detail = ProblemDetail::UnexpectedMessage(String::from("hello\nworld"));

    // WHEN: Displaying
    let text = detail.to_string();

    // THEN: Newline should be escaped inside quotes
    assert_eq!(text, r#"Unexpected message: "hello\nworld""#);
}
