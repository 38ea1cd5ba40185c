//! JSON API and message submission routes.

use std::net::SocketAddr;

use axum::Form;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, warn};

use updates::{MessageRecord, Update, WeatherSnapshot};

use crate::services::store::{StoreError, now_unix};
use crate::state::AppState;

const SERVICE_NAME: &str = "puffball-weather-station";

// =============================================================================
// MESSAGE SUBMISSION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub message: String,
}

/// `POST /send` — store a community message and notify feed subscribers.
///
/// Form semantics match the page: blank username becomes "Anonymous",
/// blank message bounces back with `?error=true`.
pub async fn send_message(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<SendForm>,
) -> Response {
    if let Err(e) = state.rate_limiter.check_and_record(addr.ip()) {
        warn!(sender = %addr.ip(), error = %e, "message submission throttled");
        return (StatusCode::TOO_MANY_REQUESTS, e.to_string()).into_response();
    }

    match state.store.append(&form.username, &form.message).await {
        Ok(_) => {
            state.publish(Update::Messages(state.store.all().await));
            Redirect::to("/?sent=true").into_response()
        }
        Err(StoreError::EmptyMessage) => Redirect::to("/?error=true").into_response(),
        Err(e) => {
            error!(error = %e, "message append failed");
            Redirect::to("/?error=true").into_response()
        }
    }
}

// =============================================================================
// READ API
// =============================================================================

/// What the polling displays consume: newest message, cached weather, and
/// the scene image for this moment.
#[derive(Serialize)]
pub struct LatestResponse {
    pub message: Option<MessageRecord>,
    pub weather: WeatherSnapshot,
    pub scene: Option<String>,
    pub timestamp: i64,
}

/// `GET /api/latest`
pub async fn latest(State(state): State<AppState>) -> Json<LatestResponse> {
    let weather = state.snapshot().await;
    let now = now_unix();
    Json(LatestResponse {
        message: state.store.latest().await,
        scene: state.scenes.current(weather.season, now),
        weather,
        timestamp: now,
    })
}

#[derive(Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageRecord>,
}

/// `GET /api/messages` — the retained log, insertion order, newest last.
pub async fn messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    Json(MessagesResponse { messages: state.store.all().await })
}

/// `GET /api/weather` — the cached snapshot, season included.
pub async fn weather(State(state): State<AppState>) -> Json<WeatherSnapshot> {
    Json(state.snapshot().await)
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
