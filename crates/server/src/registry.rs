//! Session registry: the bounded set of active participant names.

use std::collections::HashMap;

use huddle_shared::RoomError;

/// Outcome of a reconnect attempt the room can honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconnect {
    /// The name was not active and has been added; treat as a fresh join.
    Joined,
    /// The name was already active; nothing changed.
    AlreadyActive,
}

/// Tracks active participants in join order, plus the per-base-name counters
/// used to disambiguate duplicate display names.
///
/// Pure state: nothing here emits events. The router decides what to
/// broadcast from the returned values.
#[derive(Debug)]
pub struct SessionRegistry {
    capacity: usize,
    active: Vec<String>,
    /// Base name → next suffix. Monotonic for the lifetime of the room, so a
    /// suffix is never handed out twice even after its holder leaves.
    counters: HashMap<String, u32>,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            active: Vec::new(),
            counters: HashMap::new(),
        }
    }

    fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| n == name)
    }

    /// Register a participant under `requested`, appending a numeric suffix
    /// when the name is already taken.
    ///
    /// Every registration adds a participant, so a full room always rejects.
    pub fn register(&mut self, requested: &str) -> Result<String, RoomError> {
        if self.active.len() >= self.capacity {
            return Err(RoomError::RoomFull);
        }

        let counter = self.counters.entry(requested.to_string()).or_insert(0);
        let mut assigned = if *counter == 0 {
            requested.to_string()
        } else {
            format!("{requested}{counter}")
        };
        // A reconnect can resurrect a name with no counter behind it; skip
        // past anything currently active.
        while self.active.iter().any(|n| n == &assigned) {
            *counter += 1;
            assigned = format!("{requested}{counter}");
        }
        *counter += 1;

        self.active.push(assigned.clone());
        Ok(assigned)
    }

    /// Re-admit `name` after a transport-level reconnect.
    ///
    /// Rejects only when the name is not already active and the room is
    /// full. Idempotent for active names. Counters are untouched.
    pub fn reconnect(&mut self, name: &str) -> Result<Reconnect, RoomError> {
        if self.is_active(name) {
            return Ok(Reconnect::AlreadyActive);
        }
        if self.active.len() >= self.capacity {
            return Err(RoomError::RoomFull);
        }
        self.active.push(name.to_string());
        Ok(Reconnect::Joined)
    }

    /// Remove `name` if present. Idempotent; reports whether anything changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n != name);
        self.active.len() != before
    }

    /// Drop every participant and all disambiguation counters.
    pub fn reset(&mut self) {
        self.active.clear();
        self.counters.clear();
    }

    /// Active participants in join order.
    pub fn list(&self) -> Vec<String> {
        self.active.clone()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
