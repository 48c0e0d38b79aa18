pub mod builder;

use serde::Serialize;

/// Where and how to open the backend socket.
///
/// Carried by the outbound `Connect` command; `name` also tags every `Send`
/// so the transport can route content to the right connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocketTarget {
    pub name: String,
    pub address: String,
    /// Sent as `Sec-WebSocket-Protocol` when present.
    pub protocol: Option<String>,
}
