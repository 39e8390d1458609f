//! Server configuration from environment variables.

use std::net::SocketAddr;

const DEFAULT_MAX_PARTICIPANTS: usize = 3;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Room capacity: at most this many participants at once.
    pub max_participants: usize,
    pub frontend: FrontendMode,
}

impl ServerConfig {
    /// Parse the server configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HUDDLE_BIND_ADDR`: listen address (default: "0.0.0.0:8080")
    /// - `HUDDLE_MAX_PARTICIPANTS`: room capacity (default: 3)
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("HUDDLE_BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let max_participants = std::env::var("HUDDLE_MAX_PARTICIPANTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_PARTICIPANTS);

        Self {
            bind_addr,
            max_participants,
            frontend: FrontendMode::from_env(),
        }
    }
}

/// Frontend serving mode configuration.
#[derive(Debug, Clone)]
pub enum FrontendMode {
    /// Serve the chat page and its assets from a directory.
    Static { dir: String },
    /// No frontend serving - relay only.
    Disabled,
}

impl FrontendMode {
    /// Parse frontend mode from environment variables.
    ///
    /// Environment variables:
    /// - `HUDDLE_FRONTEND_MODE`: "static" | "disabled" (default: "disabled")
    /// - `HUDDLE_STATIC_DIR`: directory for static mode (default: "./public")
    pub fn from_env() -> Self {
        let mode = std::env::var("HUDDLE_FRONTEND_MODE")
            .unwrap_or_else(|_| "disabled".to_string())
            .to_lowercase();

        match mode.as_str() {
            "static" => {
                let dir = std::env::var("HUDDLE_STATIC_DIR")
                    .unwrap_or_else(|_| "./public".to_string());
                FrontendMode::Static { dir }
            }
            _ => FrontendMode::Disabled,
        }
    }
}
