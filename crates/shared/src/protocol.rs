//! Wire protocol for the huddle relay.
//!
//! One JSON text frame per event, adjacently tagged:
//! `{"type": "...", "data": {...}}`. Events with no payload omit `data`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ChatMessage;

/// Events a client sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Request a display name. Answered with a `usernameAck` to the sender.
    SetUsername { name: String },
    /// Re-announce a previously assigned name after a page refresh or a
    /// transport-level reconnect.
    UserReconnect { name: String },
    ChatMessage { text: String },
    /// Toggle a reaction. `None` (or an empty symbol) clears the sender's
    /// current reaction.
    AddReaction {
        message_id: u64,
        #[serde(default)]
        reaction: Option<String>,
    },
    ReadMessage { message_id: u64 },
    Typing,
    StopTyping,
    LeaveChat,
    EndChat,
}

/// Events the relay sends to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Reply to `setUsername`, delivered to the requester only.
    UsernameAck {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    UserJoined { name: String },
    UserLeft { name: String },
    /// Current roster, in join order.
    UpdateUserList(Vec<String>),
    /// A newly appended message, broadcast in full.
    ChatMessage(ChatMessage),
    UpdateReactions {
        message_id: u64,
        reactions: HashMap<String, u32>,
    },
    UpdateReadReceipts {
        message_id: u64,
        read_by: Vec<String>,
    },
    DisplayTyping { name: String },
    RemoveTyping { name: String },
    /// The room ended. Broadcast on an explicit end, or sent alone to a
    /// reconnect the room cannot honor.
    EndChat,
}
