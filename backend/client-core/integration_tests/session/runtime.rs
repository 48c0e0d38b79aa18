use crate::backend_tests::helpers::{
    BackendEvent, ChannelRenderer, compiler_reply, free_port, start_fake_backend,
    start_fake_backend_on,
};

use client_core::render::View;
use client_core::runtime::SessionRuntime;
use client_core::transport::WsTransport;

use models::{ProblemDetail, Session, SocketTargetBuilder};

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, channel, unbounded_channel};
use tokio::sync::oneshot;
use tokio::time::timeout;
use url::Url;

const WAIT: Duration = Duration::from_secs(10);

async fn next_view(views: &mut UnboundedReceiver<View>) -> View {
    timeout(WAIT, views.recv())
        .await
        .expect("view in time")
        .expect("renderer alive")
}

/// Skip views until one matches, so tests don't depend on render counts.
async fn wait_for_view(views: &mut UnboundedReceiver<View>, wanted: impl Fn(&View) -> bool) -> View {
    loop {
        let view = next_view(views).await;
        if wanted(&view) {
            return view;
        }
    }
}

/// **VALUE**: Verifies the whole client against a real socket: connect, edit, compile, run,
/// then a failing compile.
///
/// **WHY THIS MATTERS**: Unit tests cover each layer with doubles; this proves the layers
/// agree on the wire format and the effect plumbing.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The greeting does not move the session to Connected
/// - The edit is not sent verbatim over the configured socket
/// - Success handles are not resolved against the frame base
/// - Error replies are not shown as a compilation problem
#[tokio::test]
async fn given_live_backend_when_edits_submitted_then_renders_frame_and_errors() {
    // GIVEN: A backend and a runtime wired with the WebSocket transport
    let mut backend = start_fake_backend(compiler_reply()).await;
    let target = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address(backend.address.as_str())
        .build()
        .unwrap();
    let (transport, socket_events) = WsTransport::new();
    let (views_tx, mut views) = unbounded_channel();
    let (edits, edits_rx) = channel(8);
    let (stop, stopped) = oneshot::channel::<()>();

    let runtime = SessionRuntime::new(
        transport,
        ChannelRenderer { views: views_tx },
        target,
        Url::parse("http://127.0.0.1:8080/run/").unwrap(),
        Duration::from_secs(1),
    );
    let task = tokio::spawn(runtime.run(socket_events, edits_rx, async move {
        let _ = stopped.await;
    }));

    // WHEN: The backend greets us
    wait_for_view(&mut views, |v| {
        matches!(v, View::Status(text) if text.starts_with("Connected"))
    })
    .await;

    // AND: A good edit is submitted
    edits.send(String::from("main = 42")).await.unwrap();

    // THEN: The backend sees the source and the frame appears
    assert_eq!(
        backend.next_event().await,
        BackendEvent::Handshake { protocol: None }
    );
    assert_eq!(
        backend.next_event().await,
        BackendEvent::Received(String::from("main = 42"))
    );
    let frame = wait_for_view(&mut views, |v| matches!(v, View::Frame { .. })).await;
    assert_eq!(
        frame,
        View::Frame {
            url: String::from("http://127.0.0.1:8080/run/build-9")
        }
    );

    // WHEN: A broken edit is submitted
    edits.send(String::from("main = broken")).await.unwrap();

    // THEN: The compile error is shown
    let problem = wait_for_view(&mut views, |v| matches!(v, View::ErrorBlock { .. })).await;
    assert_eq!(
        problem,
        View::ErrorBlock {
            title: ProblemDetail::CompilationError(String::new())
                .title()
                .to_string(),
            body: String::from("Syntax error\nline 1"),
        }
    );

    // WHEN: Shutdown is requested
    stop.send(()).unwrap();

    // THEN: The final session is returned
    let session = timeout(WAIT, task)
        .await
        .expect("task ends in time")
        .expect("no panic")
        .expect("clean shutdown");
    assert_eq!(
        session,
        Session::Problem(ProblemDetail::CompilationError(String::from(
            "Syntax error\nline 1"
        )))
    );
}

/// **VALUE**: Verifies the client recovers on its own when the backend starts late.
///
/// **WHY THIS MATTERS**: Developers often start the client before the backend, or restart
/// the backend mid-session. Recovery must need no user action.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - A refused connect is not reported as `connection failed`
/// - The retry timer is not armed after the failure
/// - A successful reconnect does not clear the problem
#[tokio::test]
async fn given_backend_down_when_it_starts_then_runtime_reconnects() {
    // GIVEN: A port nobody listens on yet
    let port = free_port();
    let target = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address(format!("ws://127.0.0.1:{port}/compile"))
        .build()
        .unwrap();
    let (transport, socket_events) = WsTransport::new();
    let (views_tx, mut views) = unbounded_channel();
    let (edits, edits_rx) = channel::<String>(8);

    let runtime = SessionRuntime::new(
        transport,
        ChannelRenderer { views: views_tx },
        target,
        Url::parse("http://127.0.0.1:8080/run/").unwrap(),
        Duration::from_millis(100),
    );
    let task = tokio::spawn(runtime.run(socket_events, edits_rx, std::future::pending()));

    // WHEN: The first connect fails
    let failed = wait_for_view(&mut views, |v| matches!(v, View::ErrorBlock { .. })).await;
    assert!(matches!(
        failed,
        View::ErrorBlock { ref title, .. } if title == ProblemDetail::ConnectionFailed.title()
    ));

    // AND: The backend comes up
    let _backend = start_fake_backend_on(port, compiler_reply()).await;

    // THEN: The runtime reconnects and reaches Connected
    wait_for_view(&mut views, |v| {
        matches!(v, View::Status(text) if text.starts_with("Connected"))
    })
    .await;

    drop(edits);
    let session = timeout(WAIT, task)
        .await
        .expect("task ends in time")
        .expect("no panic")
        .expect("clean shutdown");
    assert_eq!(session, Session::Connected);
}
