//! Per-connection session context.

use uuid::Uuid;

/// Identifies one transport-level connection for recipient selection.
pub type ConnId = Uuid;

/// State for a single WebSocket connection.
///
/// The bound name travels here, alongside each event, rather than as a
/// property of a shared connection object: the router sees exactly one
/// session per call and nothing else about the transport.
#[derive(Debug, Clone)]
pub struct ConnSession {
    /// Unique connection identifier.
    pub id: ConnId,
    /// Display name bound by a successful join or reconnect.
    pub name: Option<String>,
}

impl ConnSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
        }
    }

    /// The name bound to this connection, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Default for ConnSession {
    fn default() -> Self {
        Self::new()
    }
}
