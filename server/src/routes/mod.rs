//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the whole station: the HTML page at `/`, the
//! JSON API the displays poll, the websocket feed, and the scene images as
//! static files under `/assets`.

pub mod api;
pub mod ws;

use std::path::PathBuf;

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the directory holding the season image folders and any other
/// static assets.
pub fn assets_dir() -> PathBuf {
    std::env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/send", post(api::send_message))
        .route("/api/latest", get(api::latest))
        .route("/api/messages", get(api::messages))
        .route("/api/weather", get(api::weather))
        .route("/health", get(api::health))
        .route("/ws", get(ws::handle_ws))
        .nest_service("/assets", ServeDir::new(assets_dir()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The station page. Static markup; all data arrives over the JSON API and
/// the websocket feed.
async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
