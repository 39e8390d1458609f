//! Room error taxonomy.

use thiserror::Error;

/// Failures the relay surfaces to a client.
///
/// Unknown message ids and events from connections with no bound name are
/// handled as silent no-ops by the router and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The room already holds its maximum number of participants.
    #[error("Chat room is full.")]
    RoomFull,
}
