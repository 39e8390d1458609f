//! WebSocket handler: transport glue between sockets and the event router.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use huddle_shared::{ClientEvent, ServerEvent};

use crate::router::Directive;
use crate::session::ConnSession;
use crate::state::AppState;

/// What the writer task does next for this connection.
enum Outgoing {
    Event(ServerEvent),
    Close,
}

/// WebSocket upgrade handler.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = ConnSession::new();
    let conn_id = session.id;

    tracing::info!("connection {} opened", conn_id);

    let (forward_tx, mut forward_rx) = mpsc::unbounded_channel::<Outgoing>();

    // Narrow the room-wide directive stream down to this connection.
    let mut hub_rx = state.hub.subscribe();
    let filter_tx = forward_tx.clone();
    let filter_task = tokio::spawn(async move {
        while let Ok(directive) = hub_rx.recv().await {
            let out = match directive {
                Directive::Send { to, event } if to.includes(conn_id) => Outgoing::Event(event),
                Directive::Close { to } if to.includes(conn_id) => Outgoing::Close,
                _ => continue,
            };
            let closing = matches!(out, Outgoing::Close);
            if filter_tx.send(out).is_err() || closing {
                break;
            }
        }
    });

    // Drain the forward channel into the socket.
    let send_task = tokio::spawn(async move {
        while let Some(out) = forward_rx.recv().await {
            match out {
                Outgoing::Event(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Outgoing::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    // Show the newcomer the current roster.
    {
        let router = state.router.lock().await;
        for directive in router.on_connect(&session) {
            state.hub.dispatch(directive);
        }
    }

    // Serialized event path: each frame is validated, applied and dispatched
    // to completion under the room lock before the next one is read.
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let Ok(event) = serde_json::from_str::<ClientEvent>(&text) else {
                    tracing::debug!("connection {} sent an undecodable frame, dropped", conn_id);
                    continue;
                };
                let mut router = state.router.lock().await;
                for directive in router.handle(&mut session, event) {
                    state.hub.dispatch(directive);
                }
            }
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => {}
        }
    }

    // Transport-level disconnect: announce the departure if the participant
    // was still registered.
    {
        let mut router = state.router.lock().await;
        for directive in router.on_disconnect(&session) {
            state.hub.dispatch(directive);
        }
    }

    filter_task.abort();
    send_task.abort();

    tracing::info!("connection {} closed", conn_id);
}
