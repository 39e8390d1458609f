//! Huddle relay server.
//!
//! A single-room, bounded-capacity group chat relay over WebSocket: it
//! broadcasts messages, tracks per-message reactions and read receipts, and
//! relays typing and presence events to every connected participant.

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod frontend;
mod registry;
mod router;
mod session;
mod state;
mod store;
mod ws;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huddle_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(config.max_participants);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);
    let app = frontend::with_frontend_fallback(app, &config.frontend);

    tracing::info!(
        "Starting relay on {} (room capacity {})",
        config.bind_addr,
        config.max_participants
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
