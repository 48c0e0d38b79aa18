//! WebSocket transport built on `tokio-tungstenite`.
//!
//! Each `Connect` spawns one background task that owns the socket. The task
//! forwards inbound frames as [`SocketEvent`]s and writes outbound content it
//! receives on a per-connection channel. Replacing the connection drops that
//! channel, which tells the old task to close quietly.
//!
//! Failures are reported in protocol terms: a failed connect, a read error, a
//! remote close, or a send with no live socket all surface as the
//! `connection failed` message so the session can schedule a retry.

use crate::error::ws::WsError;
use crate::protocol::CONNECTION_FAILED;
use crate::transport::{SocketCommand, SocketEvent, SocketTransport};

use common::ErrorLocation;
use models::SocketTarget;

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::spawn as TokioSpawn;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;

/// The live (or connecting) socket.
struct Connection {
    name: String,
    outbound: UnboundedSender<String>,
}

/// [`SocketTransport`] over a real WebSocket.
pub struct WsTransport {
    events: UnboundedSender<SocketEvent>,
    connection: Option<Connection>,
}

impl WsTransport {
    /// Create the transport and the receiver its events arrive on.
    pub fn new() -> (Self, UnboundedReceiver<SocketEvent>) {
        let (events, receiver) = unbounded_channel();
        (
            Self {
                events,
                connection: None,
            },
            receiver,
        )
    }

    fn connect(&mut self, target: SocketTarget) -> Result<(), WsError> {
        let request = build_request(&target)?;
        let (outbound, outbound_rx) = unbounded_channel();

        let previous = self.connection.replace(Connection {
            name: target.name.clone(),
            outbound,
        });
        if let Some(previous) = previous {
            debug!("Superseding socket {}", previous.name);
        }

        info!("Connecting socket {} to {}", target.name, target.address);
        TokioSpawn(drive_connection(
            target.name,
            request,
            self.events.clone(),
            outbound_rx,
        ));

        Ok(())
    }

    fn send(&mut self, name: String, content: String) -> Result<(), WsError> {
        let Some(connection) = self.connection.as_ref().filter(|c| c.name == name) else {
            warn!("Cannot send on socket {name}: not connected");
            return self.report(SocketEvent::Message(CONNECTION_FAILED.to_string()));
        };

        debug!("Sending {} bytes on socket {name}", content.len());
        if connection.outbound.send(content).is_err() {
            warn!("Cannot send on socket {name}: connection closed");
            self.connection = None;
            return self.report(SocketEvent::Message(CONNECTION_FAILED.to_string()));
        }

        Ok(())
    }

    #[track_caller]
    fn report(&self, event: SocketEvent) -> Result<(), WsError> {
        self.events
            .send(event)
            .map_err(|e| WsError::EventChannelClosed {
                message: format!("Socket event receiver dropped: {e}"),
                location: ErrorLocation::caller(),
            })
    }
}

impl SocketTransport for WsTransport {
    fn execute(&mut self, command: SocketCommand) -> Result<(), WsError> {
        match command {
            SocketCommand::Connect(target) => self.connect(target),
            SocketCommand::Send { name, content } => self.send(name, content),
        }
    }
}

/// Build the handshake request, adding the subprotocol header when set.
#[track_caller]
pub(crate) fn build_request(target: &SocketTarget) -> Result<Request, WsError> {
    let mut request =
        target
            .address
            .as_str()
            .into_client_request()
            .map_err(|e| WsError::Request {
                message: format!("Invalid socket address {}", target.address),
                location: ErrorLocation::caller(),
                source: Box::new(e),
            })?;

    if let Some(ref protocol) = target.protocol {
        let value = HeaderValue::from_str(protocol).map_err(|e| WsError::Request {
            message: format!("Invalid socket protocol {protocol}"),
            location: ErrorLocation::caller(),
            source: Box::new(e),
        })?;
        request.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, value);
    }

    Ok(request)
}

/// Turn a binary frame into a text message, or a decode failure.
pub(crate) fn decode_binary(bytes: &[u8]) -> SocketEvent {
    match std::str::from_utf8(bytes) {
        Ok(text) => SocketEvent::Message(text.to_string()),
        Err(e) => SocketEvent::DecodeError(format!("Binary frame is not valid UTF-8: {e}")),
    }
}

/// Report a lost connection unless this task has already been superseded.
fn report_failure(
    name: &str,
    events: &UnboundedSender<SocketEvent>,
    outbound: &UnboundedReceiver<String>,
) {
    if outbound.is_closed() {
        debug!("Socket {name} superseded, not reporting failure");
        return;
    }
    let _ = events.send(SocketEvent::Message(CONNECTION_FAILED.to_string()));
}

async fn drive_connection(
    name: String,
    request: Request,
    events: UnboundedSender<SocketEvent>,
    mut outbound: UnboundedReceiver<String>,
) {
    let stream = match connect_async(request).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            warn!("Socket {name} failed to connect: {e}");
            report_failure(&name, &events, &outbound);
            return;
        }
    };

    if outbound.is_closed() {
        debug!("Socket {name} superseded during handshake, dropping");
        return;
    }

    info!("Socket {name} connected");
    if events.send(SocketEvent::Connected).is_err() {
        return;
    }

    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            content = outbound.recv() => {
                let Some(content) = content else {
                    debug!("Socket {name} superseded, closing");
                    let _ = write.close().await;
                    return;
                };
                if let Err(e) = write.send(Message::Text(content.into())).await {
                    warn!("Socket {name} write failed: {e}");
                    report_failure(&name, &events, &outbound);
                    return;
                }
            }
            frame = read.next() => {
                let event = match frame {
                    Some(Ok(Message::Text(text))) => SocketEvent::Message(text.as_str().to_owned()),
                    Some(Ok(Message::Binary(bytes))) => decode_binary(&bytes),
                    Some(Ok(Message::Close(frame))) => {
                        info!("Socket {name} closed by server: {frame:?}");
                        report_failure(&name, &events, &outbound);
                        return;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("Socket {name} read failed: {e}");
                        report_failure(&name, &events, &outbound);
                        return;
                    }
                    None => {
                        info!("Socket {name} stream ended");
                        report_failure(&name, &events, &outbound);
                        return;
                    }
                };
                if events.send(event).is_err() {
                    return;
                }
            }
        }
    }
}
