//! Frontend serving - static entry-page fallback.

use axum::Router;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::FrontendMode;

/// Add the entry-page fallback to a fully-stated router.
///
/// The relay itself only owns `/ws`; the chat page and its assets are an
/// external collaborator served as plain static files.
pub fn with_frontend_fallback(router: Router, mode: &FrontendMode) -> Router {
    match mode {
        FrontendMode::Static { dir } => {
            tracing::info!("Frontend mode: static files from {}", dir);
            let path = PathBuf::from(dir);
            let index_path = path.join("index.html");
            let serve_dir = ServeDir::new(&path).fallback(ServeFile::new(index_path));
            router.fallback_service(serve_dir)
        }
        FrontendMode::Disabled => {
            tracing::info!("Frontend mode: disabled (relay only)");
            router
        }
    }
}
