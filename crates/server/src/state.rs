//! Application state shared across connection handlers.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::router::{Directive, EventRouter};

/// Capacity of the room-wide directive channel. A receiver that falls this
/// far behind skips directives; delivery is best-effort.
const HUB_CAPACITY: usize = 256;

/// Fan-out hub: one broadcast channel for the whole room.
///
/// Every connection subscribes and filters directives locally against its
/// own connection id, so "all except sender" and "sender only" cost nothing
/// extra at dispatch time.
#[derive(Clone)]
pub struct EventHub {
    sender: broadcast::Sender<Directive>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Directive> {
        self.sender.subscribe()
    }

    /// Publish a directive. A send with no receivers is fine - the room may
    /// be empty.
    pub fn dispatch(&self, directive: Directive) {
        let _ = self.sender.send(directive);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The single-writer room state. Handlers hold this lock for the full
    /// validate-mutate-dispatch step of each event.
    pub router: Arc<Mutex<EventRouter>>,
    pub hub: EventHub,
}

impl AppState {
    pub fn new(max_participants: usize) -> Self {
        Self {
            router: Arc::new(Mutex::new(EventRouter::new(max_participants))),
            hub: EventHub::new(),
        }
    }
}
