// Unit tests for views and the terminal renderer.

use crate::config::ClientConfig;
use crate::render::{Renderer, TerminalRenderer, View};

use models::{ProblemDetail, Session};

use url::Url;

fn frame_base() -> Url {
    Url::parse("http://127.0.0.1:8080/run/").expect("valid test url")
}

/// **VALUE**: Verifies that idle and busy sessions render as plain status text.
///
/// **WHY THIS MATTERS**: These are the states the user sees most of the time.
///
/// **BUG THIS CATCHES**: Would catch if a status state renders as a frame or error block.
#[test]
fn given_status_sessions_when_viewed_then_status_text() {
    // GIVEN
    let sessions = [Session::Disconnected, Session::Connected, Session::Compiling];

    // WHEN / THEN
    for session in sessions {
        let view = View::from_session(&session, &frame_base());
        assert!(matches!(view, View::Status(_)), "{session:?} -> {view:?}");
    }
}

/// **VALUE**: Verifies that a running session is addressed by its handle.
///
/// **WHY THIS MATTERS**: The frame URL is how the user reaches the compiled program.
///
/// **BUG THIS CATCHES**: Would catch if the handle replaces the base path instead of being
/// joined onto it.
#[test]
fn given_running_session_when_viewed_then_frame_url_joins_handle() {
    // GIVEN
    let session = Session::Running(String::from("abc123"));

    // WHEN
    let view = View::from_session(&session, &frame_base());

    // THEN
    assert_eq!(
        view,
        View::Frame {
            url: String::from("http://127.0.0.1:8080/run/abc123")
        }
    );
}

/// **VALUE**: Verifies a configured base without a trailing slash keeps its last segment.
///
/// **WHY THIS MATTERS**: `http://host/run` passes config validation; users expect frames
/// under `/run`, not at the server root.
///
/// **BUG THIS CATCHES**: Would catch if the handle is resolved as a relative reference,
/// which replaces the last path segment of the base.
#[test]
fn given_base_without_trailing_slash_when_viewed_then_handle_appended() {
    // GIVEN
    let mut config = ClientConfig::default();
    config.display.frame_base_url = String::from("http://127.0.0.1:8080/run");
    config.validate().expect("base without slash is valid");
    let frame_base = config.frame_base_url().unwrap();

    // WHEN
    let view = View::from_session(&Session::Running(String::from("abc123")), &frame_base);

    // THEN
    assert_eq!(
        view,
        View::Frame {
            url: String::from("http://127.0.0.1:8080/run/abc123")
        }
    );
}

/// **VALUE**: Verifies handles are treated as data and stay under the frame base.
///
/// **WHY THIS MATTERS**: The handle comes from the network. A handle shaped like a URL,
/// an absolute path or a parent reference must not send the user somewhere else.
///
/// **BUG THIS CATCHES**: Would catch if `:`, `/` or `..` in a handle change the host or
/// path of the frame URL.
#[test]
fn given_url_like_handles_when_viewed_then_frame_stays_under_base() {
    // GIVEN
    let cases = [
        ("a:b", "http://127.0.0.1:8080/run/a:b"),
        ("//evil.example/x", "http://127.0.0.1:8080/run/%2F%2Fevil.example%2Fx"),
        ("/admin", "http://127.0.0.1:8080/run/%2Fadmin"),
        ("../admin", "http://127.0.0.1:8080/run/..%2Fadmin"),
    ];

    for (handle, expected) in cases {
        // WHEN
        let view = View::from_session(&Session::Running(handle.to_string()), &frame_base());

        // THEN
        assert_eq!(
            view,
            View::Frame {
                url: expected.to_string()
            },
            "handle {handle:?}"
        );
    }
}

/// **VALUE**: Verifies dot-segment handles never address the base or its parent.
///
/// **WHY THIS MATTERS**: `.` and `..` cannot be a path segment without being collapsed.
///
/// **BUG THIS CATCHES**: Would catch if `..` yields a frame URL pointing at the base itself.
#[test]
fn given_dot_segment_handle_when_viewed_then_bare_handle_shown() {
    // GIVEN / WHEN
    let view = View::from_session(&Session::Running(String::from("..")), &frame_base());

    // THEN
    assert_eq!(
        view,
        View::Frame {
            url: String::from("..")
        }
    );
}

/// **VALUE**: Verifies each problem renders as an error block with its detail.
///
/// **WHY THIS MATTERS**: Each problem variant needs a distinct, readable explanation.
///
/// **BUG THIS CATCHES**: Would catch if a variant loses its detail text.
#[test]
fn given_problem_sessions_when_viewed_then_error_block_carries_detail() {
    // GIVEN
    let cases = [
        (ProblemDetail::CompilationError(String::from("type mismatch")), "type mismatch"),
        (ProblemDetail::ConnectionFailed, "Retrying"),
        (ProblemDetail::MessageDecodeFailure(String::from("bad utf-8")), "bad utf-8"),
        (ProblemDetail::UnexpectedMessage(String::from("ping")), "ping"),
    ];

    for (detail, needle) in cases {
        // WHEN
        let view = View::from_session(&Session::Problem(detail.clone()), &frame_base());

        // THEN
        match view {
            View::ErrorBlock { title, body } => {
                assert_eq!(title, detail.title());
                assert!(body.contains(needle), "{body:?} should contain {needle:?}");
            }
            other => panic!("Expected error block for {detail:?}, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies the multi-line error block layout.
///
/// **WHY THIS MATTERS**: Compiler output must stay aligned and clearly grouped under its
/// heading in the terminal.
///
/// **BUG THIS CATCHES**: Would catch if body lines are not prefixed or get merged.
#[test]
fn given_error_block_when_displayed_then_indents_each_body_line() {
    // GIVEN
    let view = View::ErrorBlock {
        title: String::from("Compilation error"),
        body: String::from("line one\nline two"),
    };

    // WHEN
    let text = view.to_string();

    // THEN
    assert_eq!(text, "!! Compilation error\n   | line one\n   | line two");
}

/// **VALUE**: Verifies the terminal renderer prints new views and skips repeats.
///
/// **WHY THIS MATTERS**: The runtime re-renders after every event, including no-op timer
/// ticks; printing duplicates would flood the terminal.
///
/// **BUG THIS CATCHES**: Would catch if the duplicate check is removed or never updated.
#[test]
fn given_repeated_views_when_rendered_then_prints_each_change_once() {
    // GIVEN
    let mut renderer = TerminalRenderer::new(Vec::new());
    let compiling = View::Status(String::from("Compiling..."));
    let running = View::Frame {
        url: String::from("http://x/run/1"),
    };

    // WHEN
    renderer.render(&compiling);
    renderer.render(&compiling);
    renderer.render(&running);
    renderer.render(&compiling);

    // THEN
    let output = String::from_utf8(renderer.into_inner()).expect("utf-8 output");
    assert_eq!(
        output,
        "* Compiling...\n> Running at http://x/run/1\n* Compiling...\n"
    );
}
