//! Refresh service — background weather polling.
//!
//! DESIGN
//! ======
//! One task owns all upstream I/O: every cycle it fetches current
//! conditions, swaps the cached snapshot, and publishes the update to feed
//! subscribers. Request handlers and websocket pushes only ever read the
//! cache, so a slow or down provider never stalls the serving path.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch keeps the previous snapshot. Until a first fetch
//! succeeds the cache holds the demo observation, so every surface renders
//! something from boot.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use weather::CurrentWeather;

use crate::state::AppState;

const DEFAULT_REFRESH_SECS: u64 = 30;

/// Spawn the background refresh task. Returns a handle for shutdown.
///
/// With no upstream client configured the task exits immediately and the
/// cache keeps serving the demo snapshot.
pub fn spawn_refresh_task(state: AppState) -> JoinHandle<()> {
    let refresh_secs = super::env_parse("WEATHER_REFRESH_SECS", DEFAULT_REFRESH_SECS).max(1);
    tokio::spawn(async move {
        let Some(client) = state.client.clone() else {
            info!("weather refresh disabled — no provider configured");
            return;
        };
        info!(refresh_secs, city = client.city(), "weather refresh configured");

        let mut ticker = tokio::time::interval(Duration::from_secs(refresh_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            refresh_once(&state, client.as_ref()).await;
        }
    })
}

/// Run one fetch-and-publish cycle.
pub(crate) async fn refresh_once(state: &AppState, client: &dyn CurrentWeather) {
    match client.current().await {
        Ok(snapshot) => {
            info!(
                temperature_c = snapshot.temperature_c,
                season = snapshot.season.as_str(),
                condition = %snapshot.condition,
                "weather refreshed"
            );
            state.set_weather(snapshot).await;
        }
        Err(e) => {
            warn!(error = %e, retryable = e.retryable(), "weather fetch failed; keeping last snapshot");
        }
    }
}

#[cfg(test)]
#[path = "refresh_test.rs"]
mod tests;
