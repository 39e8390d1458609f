//! The protocol state machine: validates each inbound event against the room
//! state, applies it, and computes explicit delivery directives.

use chrono::Utc;

use huddle_shared::{ClientEvent, RoomError, ServerEvent};

use crate::registry::{Reconnect, SessionRegistry};
use crate::session::{ConnId, ConnSession};
use crate::store::MessageStore;

/// Who receives a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    All,
    AllExcept(ConnId),
    Only(ConnId),
}

impl Recipients {
    /// Whether connection `id` is in the target set.
    pub fn includes(&self, id: ConnId) -> bool {
        match *self {
            Recipients::All => true,
            Recipients::AllExcept(except) => id != except,
            Recipients::Only(only) => id == only,
        }
    }
}

/// One unit of transport work computed by the router.
///
/// The transport layer only delivers; every decision about who hears what is
/// made here, where tests can assert on it without a socket in sight.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Deliver `event` to every connection in `to`.
    Send { to: Recipients, event: ServerEvent },
    /// Close every connection in `to`, after anything already queued for it.
    Close { to: Recipients },
}

/// One router serves the whole room.
///
/// All mutation of the registry and the store happens inside these methods;
/// the transport layer calls them under a single lock, so every event is
/// applied to completion before the next one is looked at.
#[derive(Debug)]
pub struct EventRouter {
    registry: SessionRegistry,
    store: MessageStore,
}

impl EventRouter {
    pub fn new(max_participants: usize) -> Self {
        Self {
            registry: SessionRegistry::new(max_participants),
            store: MessageStore::new(),
        }
    }

    /// A connection opened: show the newcomer the current roster.
    pub fn on_connect(&self, session: &ConnSession) -> Vec<Directive> {
        vec![Directive::Send {
            to: Recipients::Only(session.id),
            event: ServerEvent::UpdateUserList(self.registry.list()),
        }]
    }

    /// Apply one client event and compute the resulting deliveries.
    pub fn handle(&mut self, session: &mut ConnSession, event: ClientEvent) -> Vec<Directive> {
        match event {
            ClientEvent::SetUsername { name } => self.set_username(session, name),
            ClientEvent::UserReconnect { name } => self.user_reconnect(session, name),
            ClientEvent::ChatMessage { text } => self.chat_message(session, text),
            ClientEvent::AddReaction {
                message_id,
                reaction,
            } => self.add_reaction(session, message_id, reaction),
            ClientEvent::ReadMessage { message_id } => self.read_message(session, message_id),
            ClientEvent::Typing => self.typing(session, true),
            ClientEvent::StopTyping => self.typing(session, false),
            ClientEvent::LeaveChat => self.leave_chat(session),
            ClientEvent::EndChat => self.end_chat(),
        }
    }

    /// The transport saw the connection drop.
    pub fn on_disconnect(&mut self, session: &ConnSession) -> Vec<Directive> {
        let Some(name) = session.name() else {
            return Vec::new();
        };
        // A leave or a room reset may already have removed the name; only a
        // removal that actually happened is announced.
        if !self.registry.remove(name) {
            return Vec::new();
        }
        vec![
            Directive::Send {
                to: Recipients::All,
                event: ServerEvent::UserLeft {
                    name: name.to_string(),
                },
            },
            self.roster_update(),
        ]
    }

    fn set_username(&mut self, session: &mut ConnSession, name: String) -> Vec<Directive> {
        match self.registry.register(&name) {
            Ok(assigned) => {
                session.name = Some(assigned.clone());
                vec![
                    Directive::Send {
                        to: Recipients::Only(session.id),
                        event: ServerEvent::UsernameAck {
                            success: true,
                            message: None,
                            username: Some(assigned.clone()),
                        },
                    },
                    Directive::Send {
                        to: Recipients::All,
                        event: ServerEvent::UserJoined { name: assigned },
                    },
                    self.roster_update(),
                ]
            }
            Err(err @ RoomError::RoomFull) => vec![Directive::Send {
                to: Recipients::Only(session.id),
                event: ServerEvent::UsernameAck {
                    success: false,
                    message: Some(err.to_string()),
                    username: None,
                },
            }],
        }
    }

    fn user_reconnect(&mut self, session: &mut ConnSession, name: String) -> Vec<Directive> {
        match self.registry.reconnect(&name) {
            Ok(Reconnect::Joined) => {
                session.name = Some(name.clone());
                vec![
                    Directive::Send {
                        to: Recipients::All,
                        event: ServerEvent::UserJoined { name },
                    },
                    self.roster_update(),
                ]
            }
            Ok(Reconnect::AlreadyActive) => {
                // Same participant on a fresh socket; rebind silently.
                session.name = Some(name);
                Vec::new()
            }
            Err(RoomError::RoomFull) => vec![
                Directive::Send {
                    to: Recipients::Only(session.id),
                    event: ServerEvent::EndChat,
                },
                Directive::Close {
                    to: Recipients::Only(session.id),
                },
            ],
        }
    }

    fn chat_message(&mut self, session: &ConnSession, text: String) -> Vec<Directive> {
        let Some(name) = session.name() else {
            tracing::debug!("chat message from an unbound connection, dropped");
            return Vec::new();
        };
        let message = self.store.append(name, &text, Utc::now());
        vec![Directive::Send {
            to: Recipients::All,
            event: ServerEvent::ChatMessage(message),
        }]
    }

    fn add_reaction(
        &mut self,
        session: &ConnSession,
        message_id: u64,
        reaction: Option<String>,
    ) -> Vec<Directive> {
        let Some(name) = session.name() else {
            return Vec::new();
        };
        match self.store.toggle_reaction(message_id, name, reaction.as_deref()) {
            Some(reactions) => vec![Directive::Send {
                to: Recipients::All,
                event: ServerEvent::UpdateReactions {
                    message_id,
                    reactions,
                },
            }],
            None => Vec::new(),
        }
    }

    fn read_message(&mut self, session: &ConnSession, message_id: u64) -> Vec<Directive> {
        let Some(name) = session.name() else {
            return Vec::new();
        };
        match self.store.mark_read(message_id, name) {
            Some(read_by) => vec![Directive::Send {
                to: Recipients::All,
                event: ServerEvent::UpdateReadReceipts {
                    message_id,
                    read_by,
                },
            }],
            None => Vec::new(),
        }
    }

    fn typing(&self, session: &ConnSession, started: bool) -> Vec<Directive> {
        let Some(name) = session.name() else {
            return Vec::new();
        };
        let name = name.to_string();
        let event = if started {
            ServerEvent::DisplayTyping { name }
        } else {
            ServerEvent::RemoveTyping { name }
        };
        vec![Directive::Send {
            to: Recipients::AllExcept(session.id),
            event,
        }]
    }

    fn leave_chat(&mut self, session: &mut ConnSession) -> Vec<Directive> {
        // Unbinding here keeps the transport-level disconnect that follows
        // from announcing the departure a second time.
        let Some(name) = session.name.take() else {
            return Vec::new();
        };
        self.registry.remove(&name);
        vec![
            Directive::Send {
                to: Recipients::All,
                event: ServerEvent::UserLeft { name },
            },
            self.roster_update(),
            Directive::Close {
                to: Recipients::Only(session.id),
            },
        ]
    }

    fn end_chat(&mut self) -> Vec<Directive> {
        self.registry.reset();
        self.store.reset();
        vec![
            Directive::Send {
                to: Recipients::All,
                event: ServerEvent::EndChat,
            },
            self.roster_update(),
            Directive::Close {
                to: Recipients::All,
            },
        ]
    }

    fn roster_update(&self) -> Directive {
        Directive::Send {
            to: Recipients::All,
            event: ServerEvent::UpdateUserList(self.registry.list()),
        }
    }
}
