//! Shared data models for the huddle chat protocol.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat message as held by the relay and broadcast on the wire.
///
/// The store record and the wire record are the same shape: clients receive
/// the full object on `chatMessage` and patch it afterwards from
/// `updateReactions` / `updateReadReceipts` events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Monotonically increasing; never reused until a room reset.
    pub id: u64,
    /// Author display name at the time of send.
    pub user: String,
    /// Raw body. Formatting and sanitization are a client display concern.
    pub message: String,
    pub time: DateTime<Utc>,
    /// Reaction symbol → number of participants currently applying it.
    /// Never holds a zero count.
    pub reactions: HashMap<String, u32>,
    /// Participant → the single reaction symbol they have applied.
    pub user_reactions: HashMap<String, String>,
    /// Participants (excluding the author) who have viewed the message.
    /// Append-only.
    pub read_by: Vec<String>,
}

impl ChatMessage {
    pub fn new(
        id: u64,
        user: impl Into<String>,
        message: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user: user.into(),
            message: message.into(),
            time,
            reactions: HashMap::new(),
            user_reactions: HashMap::new(),
            read_by: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn chat_message_wire_shape() {
        let time = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
        let msg = ChatMessage::new(4, "alice", "hi there", time);
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["user"], "alice");
        assert_eq!(json["message"], "hi there");
        assert_eq!(json["time"], "2026-02-14T09:30:00Z");
        assert!(json["reactions"].as_object().unwrap().is_empty());
        assert!(json["userReactions"].as_object().unwrap().is_empty());
        assert!(json["readBy"].as_array().unwrap().is_empty());
    }
}
