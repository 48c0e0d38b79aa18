//! Test helpers for transport and runtime integration tests.
//!
//! This module provides a fake compilation backend:
//! - Real WebSocket server on localhost
//! - Greets each client with `connection established`
//! - Answers each text message with caller-chosen frames
//! - Reports handshakes and received messages to the test

use client_core::protocol::{
    CONNECTION_ESTABLISHED, CONNECTION_FAILED, ERROR_VERB, SUCCESS_VERB, ServerMessage,
    WARNING_VERB,
};
use client_core::render::{Renderer, View};

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;

/// Something the fake backend observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    Handshake { protocol: Option<String> },
    Received(String),
}

pub type Reply = Arc<dyn Fn(&str) -> Vec<Message> + Send + Sync>;

/// A running fake backend. Aborted on drop.
pub struct FakeBackend {
    pub address: String,
    pub events: UnboundedReceiver<BackendEvent>,
    task: JoinHandle<()>,
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl FakeBackend {
    pub async fn next_event(&mut self) -> BackendEvent {
        tokio::time::timeout(std::time::Duration::from_secs(5), self.events.recv())
            .await
            .expect("backend event in time")
            .expect("backend alive")
    }
}

/// Test helper: the text a backend sends for `message`.
pub fn to_wire(message: &ServerMessage) -> String {
    match message {
        ServerMessage::ConnectionEstablished => CONNECTION_ESTABLISHED.to_string(),
        ServerMessage::ConnectionFailed => CONNECTION_FAILED.to_string(),
        ServerMessage::Error(message) if message.is_empty() => ERROR_VERB.to_string(),
        ServerMessage::Error(message) => format!("{ERROR_VERB}\n{message}"),
        ServerMessage::Success(handle) => format!("{SUCCESS_VERB}\n{handle}"),
        ServerMessage::Warning(warning) => format!("{WARNING_VERB}\n{warning}"),
        ServerMessage::Unrecognized(raw) => raw.clone(),
    }
}

/// Test helper: reply `success` with a handle derived from the source length,
/// or `error` when the source contains "broken".
pub fn compiler_reply() -> Reply {
    Arc::new(|source: &str| {
        let message = if source.contains("broken") {
            ServerMessage::Error(String::from("Syntax error\nline 1"))
        } else {
            ServerMessage::Success(format!("build-{}", source.len()))
        };
        vec![Message::Text(to_wire(&message).into())]
    })
}

/// Test helper: start a fake backend on an ephemeral port.
pub async fn start_fake_backend(reply: Reply) -> FakeBackend {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    serve(listener, reply)
}

/// Test helper: start a fake backend on a specific port.
pub async fn start_fake_backend_on(port: u16, reply: Reply) -> FakeBackend {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .expect("Failed to bind fake backend on fixed port");
    serve(listener, reply)
}

/// Test helper: a port with nothing listening on it (yet).
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("addr").port()
}

fn serve(listener: TcpListener, reply: Reply) -> FakeBackend {
    let port = listener.local_addr().expect("addr").port();
    let (events_tx, events) = unbounded_channel();

    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle_client(stream, Arc::clone(&reply), events_tx.clone()));
        }
    });

    FakeBackend {
        address: format!("ws://127.0.0.1:{port}/compile"),
        events,
        task,
    }
}

async fn handle_client(
    stream: tokio::net::TcpStream,
    reply: Reply,
    events: UnboundedSender<BackendEvent>,
) {
    let echo_protocol = |request: &Request, mut response: Response| {
        let protocol = request.headers().get(SEC_WEBSOCKET_PROTOCOL).cloned();
        let _ = events.send(BackendEvent::Handshake {
            protocol: protocol
                .as_ref()
                .and_then(|p| p.to_str().ok())
                .map(str::to_string),
        });
        if let Some(protocol) = protocol {
            response.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, protocol);
        }
        Ok::<Response, ErrorResponse>(response)
    };

    let Ok(mut ws) = accept_hdr_async(stream, echo_protocol).await else {
        return;
    };

    let greeting = to_wire(&ServerMessage::ConnectionEstablished);
    if ws.send(Message::Text(greeting.into())).await.is_err() {
        return;
    }

    while let Some(Ok(message)) = ws.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        let _ = events.send(BackendEvent::Received(text.as_str().to_owned()));

        for frame in (*reply)(text.as_str()) {
            let closing = matches!(frame, Message::Close(_));
            if ws.send(frame).await.is_err() || closing {
                return;
            }
        }
    }
}

/// Renderer that forwards every view to the test.
pub struct ChannelRenderer {
    pub views: UnboundedSender<View>,
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, view: &View) {
        let _ = self.views.send(view.clone());
    }
}
