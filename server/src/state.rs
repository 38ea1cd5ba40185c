//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the cached weather snapshot, the message store, the scene
//! cycler, and the broadcast sender feeding `/ws` subscribers. Handlers
//! only ever read the cached snapshot; the background refresh task is
//! the sole writer, so the serving path never waits on the upstream API.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use updates::{Update, WeatherSnapshot};
use weather::CurrentWeather;

use crate::rate_limit::RateLimiter;
use crate::services::scene::SceneCycler;
use crate::services::store::MessageStore;

/// Capacity of the feed channel. Slow subscribers that fall further behind
/// than this skip ahead; every frame carries full state, so skips are safe.
const FEED_CAPACITY: usize = 32;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Last known observation; starts as the demo snapshot.
    pub weather: Arc<RwLock<WeatherSnapshot>>,
    pub store: MessageStore,
    pub scenes: SceneCycler,
    /// Fan-out channel for `/ws` subscribers.
    pub feed: broadcast::Sender<Update>,
    /// Optional upstream client. `None` if no provider key is configured.
    pub client: Option<Arc<dyn CurrentWeather>>,
    /// In-memory rate limiter for message submission.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(store: MessageStore, scenes: SceneCycler, client: Option<Arc<dyn CurrentWeather>>) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            weather: Arc::new(RwLock::new(WeatherSnapshot::demo())),
            store,
            scenes,
            feed,
            client,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Current cached snapshot.
    pub async fn snapshot(&self) -> WeatherSnapshot {
        self.weather.read().await.clone()
    }

    /// Replace the cached snapshot and notify feed subscribers.
    pub async fn set_weather(&self, snapshot: WeatherSnapshot) {
        {
            let mut current = self.weather.write().await;
            *current = snapshot.clone();
        }
        self.publish(Update::Weather(snapshot));
    }

    /// Push an update to feed subscribers. A send error only means nobody
    /// is connected right now.
    pub fn publish(&self, update: Update) {
        let _ = self.feed.send(update);
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
