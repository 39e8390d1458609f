//! Message store: an append-only, id-indexed log with mutable reaction and
//! read-receipt sub-state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use huddle_shared::ChatMessage;

#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new message under the next unused id and return the stored
    /// record.
    pub fn append(&mut self, author: &str, body: &str, time: DateTime<Utc>) -> ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        let message = ChatMessage::new(id, author, body, time);
        self.messages.push(message.clone());
        message
    }

    /// Look up a message by id. Absent ids yield `None`, never an error.
    pub fn find(&self, id: u64) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Toggle `user`'s reaction on message `id`.
    ///
    /// The same symbol twice un-reacts. A different symbol replaces the
    /// previous one, whose tally entry is cleared first. `None` or an empty
    /// symbol clears whatever is set. Returns the updated tally only when
    /// state actually changed.
    pub fn toggle_reaction(
        &mut self,
        id: u64,
        user: &str,
        reaction: Option<&str>,
    ) -> Option<HashMap<String, u32>> {
        let message = self.find_mut(id)?;
        // An empty symbol means "clear my reaction".
        let reaction = reaction.filter(|r| !r.is_empty());
        let previous = message.user_reactions.get(user).cloned();

        match (previous, reaction) {
            (Some(prev), Some(next)) if prev == next => {
                message.user_reactions.remove(user);
                decrement(&mut message.reactions, &prev);
            }
            (previous, next) => {
                if let Some(prev) = previous {
                    message.user_reactions.remove(user);
                    decrement(&mut message.reactions, &prev);
                } else if next.is_none() {
                    // Clearing a reaction that was never set changes nothing.
                    return None;
                }
                if let Some(next) = next {
                    message
                        .user_reactions
                        .insert(user.to_string(), next.to_string());
                    *message.reactions.entry(next.to_string()).or_insert(0) += 1;
                }
            }
        }

        Some(message.reactions.clone())
    }

    /// Record that `user` has viewed message `id`.
    ///
    /// No-op when the id is unknown, `user` authored the message, or `user`
    /// already read it; otherwise returns the updated read-by snapshot.
    pub fn mark_read(&mut self, id: u64, user: &str) -> Option<Vec<String>> {
        let message = self.find_mut(id)?;
        if message.user == user || message.read_by.iter().any(|n| n == user) {
            return None;
        }
        message.read_by.push(user.to_string());
        Some(message.read_by.clone())
    }

    /// Clear all messages and restart ids at 0.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.next_id = 0;
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn decrement(tally: &mut HashMap<String, u32>, symbol: &str) {
    if let Some(count) = tally.get_mut(symbol) {
        *count -= 1;
        if *count == 0 {
            tally.remove(symbol);
        }
    }
}
