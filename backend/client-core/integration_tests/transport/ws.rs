use crate::backend_tests::helpers::{BackendEvent, compiler_reply, start_fake_backend};

use client_core::protocol::{CONNECTION_ESTABLISHED, CONNECTION_FAILED};
use client_core::transport::{SocketCommand, SocketEvent, SocketTransport, WsTransport};

use models::{SocketTarget, SocketTargetBuilder};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

fn target_for(address: &str) -> SocketTarget {
    SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address(address)
        .build()
        .expect("valid target")
}

async fn next_event(events: &mut UnboundedReceiver<SocketEvent>) -> SocketEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("socket event in time")
        .expect("transport alive")
}

/// **VALUE**: Verifies a full connect, greet, send and reply cycle over a real socket.
///
/// **WHY THIS MATTERS**: This is the production path between the session and the
/// backend. If any leg fails the client cannot compile anything.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The open notification is not emitted
/// - Text frames are not forwarded verbatim
/// - Outbound content is not written as a text frame
#[tokio::test]
async fn given_backend_when_connect_and_send_then_events_flow_both_ways() {
    // GIVEN: A fake backend and a transport
    let mut backend = start_fake_backend(compiler_reply()).await;
    let (mut transport, mut events) = WsTransport::new();

    // WHEN: Connecting
    transport
        .execute(SocketCommand::Connect(target_for(&backend.address)))
        .expect("connect");

    // THEN: Open, then the greeting
    assert_eq!(next_event(&mut events).await, SocketEvent::Connected);
    assert_eq!(
        next_event(&mut events).await,
        SocketEvent::Message(CONNECTION_ESTABLISHED.to_string())
    );

    // WHEN: Sending source
    transport
        .execute(SocketCommand::Send {
            name: String::from("compiler"),
            content: String::from("main = 1"),
        })
        .expect("send");

    // THEN: The backend receives it and the reply comes back
    assert_eq!(
        backend.next_event().await,
        BackendEvent::Handshake { protocol: None }
    );
    assert_eq!(
        backend.next_event().await,
        BackendEvent::Received(String::from("main = 1"))
    );
    assert_eq!(
        next_event(&mut events).await,
        SocketEvent::Message(String::from("success\nbuild-8"))
    );
}

/// **VALUE**: Verifies the configured subprotocol reaches the backend.
///
/// **WHY THIS MATTERS**: Backends that multiplex protocol versions route on this header.
///
/// **BUG THIS CATCHES**: Would catch if the header is dropped from the handshake request.
#[tokio::test]
async fn given_protocol_when_connecting_then_backend_sees_protocol_header() {
    // GIVEN
    let mut backend = start_fake_backend(compiler_reply()).await;
    let target = SocketTargetBuilder::default()
        .with_name("compiler")
        .with_address(backend.address.as_str())
        .with_protocol("compile.v1")
        .build()
        .unwrap();
    let (mut transport, mut events) = WsTransport::new();

    // WHEN
    transport
        .execute(SocketCommand::Connect(target))
        .expect("connect");

    // THEN
    assert_eq!(
        backend.next_event().await,
        BackendEvent::Handshake {
            protocol: Some(String::from("compile.v1"))
        }
    );
    assert_eq!(next_event(&mut events).await, SocketEvent::Connected);
}

/// **VALUE**: Verifies undecodable binary frames surface as decode errors.
///
/// **WHY THIS MATTERS**: The session shows `MessageDecodeFailure` for these; dropping them
/// would leave the user staring at "Compiling..." forever.
///
/// **BUG THIS CATCHES**: Would catch if binary frames are ignored or lossily decoded.
#[tokio::test]
async fn given_backend_sends_invalid_utf8_when_received_then_decode_error() {
    // GIVEN: A backend that answers with garbage bytes
    let backend =
        start_fake_backend(Arc::new(|_: &str| vec![Message::Binary(vec![0xc3, 0x28].into())]))
            .await;
    let (mut transport, mut events) = WsTransport::new();
    transport
        .execute(SocketCommand::Connect(target_for(&backend.address)))
        .expect("connect");
    next_event(&mut events).await;
    next_event(&mut events).await;

    // WHEN
    transport
        .execute(SocketCommand::Send {
            name: String::from("compiler"),
            content: String::from("anything"),
        })
        .expect("send");

    // THEN
    assert!(matches!(
        next_event(&mut events).await,
        SocketEvent::DecodeError(_)
    ));
}

/// **VALUE**: Verifies a server-side close is reported as `connection failed`.
///
/// **WHY THIS MATTERS**: A backend restart closes the socket; the client must notice and
/// start retrying.
///
/// **BUG THIS CATCHES**: Would catch if close frames are treated like ping/pong.
#[tokio::test]
async fn given_backend_closes_when_received_then_connection_failed() {
    // GIVEN: A backend that hangs up on any message
    let backend = start_fake_backend(Arc::new(|_: &str| vec![Message::Close(None)])).await;
    let (mut transport, mut events) = WsTransport::new();
    transport
        .execute(SocketCommand::Connect(target_for(&backend.address)))
        .expect("connect");
    next_event(&mut events).await;
    next_event(&mut events).await;

    // WHEN
    transport
        .execute(SocketCommand::Send {
            name: String::from("compiler"),
            content: String::from("bye"),
        })
        .expect("send");

    // THEN
    assert_eq!(
        next_event(&mut events).await,
        SocketEvent::Message(CONNECTION_FAILED.to_string())
    );
}

/// **VALUE**: Verifies reconnecting replaces the old socket without a spurious failure.
///
/// **WHY THIS MATTERS**: The retry timer issues `Connect` repeatedly; the superseded
/// socket closing must not be reported as a new connection failure.
///
/// **BUG THIS CATCHES**: Would catch if the old connection task reports its shutdown.
#[tokio::test]
async fn given_open_socket_when_connect_again_then_only_new_socket_reports() {
    // GIVEN: An open socket
    let backend = start_fake_backend(compiler_reply()).await;
    let (mut transport, mut events) = WsTransport::new();
    transport
        .execute(SocketCommand::Connect(target_for(&backend.address)))
        .expect("connect");
    next_event(&mut events).await;
    next_event(&mut events).await;

    // WHEN: Connecting again
    transport
        .execute(SocketCommand::Connect(target_for(&backend.address)))
        .expect("reconnect");

    // THEN: Only the new socket's open and greeting arrive
    assert_eq!(next_event(&mut events).await, SocketEvent::Connected);
    assert_eq!(
        next_event(&mut events).await,
        SocketEvent::Message(CONNECTION_ESTABLISHED.to_string())
    );
    assert!(
        timeout(Duration::from_millis(200), events.recv()).await.is_err(),
        "no further events expected"
    );
}
