use super::*;

use updates::{Season, WeatherSnapshot};

use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn initial_push_is_weather_then_messages() {
    let state = test_app_state();
    state.store.append("friend", "hello puffball").await.unwrap();

    let updates = initial_updates(&state).await;
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].kind(), "weather");
    assert_eq!(updates[1].kind(), "messages");

    match &updates[1] {
        Update::Messages(log) => {
            assert_eq!(log.len(), 1);
            assert_eq!(log[0].message, "hello puffball");
        }
        other => panic!("expected messages update, got {}", other.kind()),
    }
}

#[tokio::test]
async fn initial_weather_reflects_cache() {
    let state = test_app_state();
    let mut snap = WeatherSnapshot::demo();
    snap.temperature_c = 14;
    snap.season = Season::Spring;
    state.set_weather(snap).await;

    let updates = initial_updates(&state).await;
    match &updates[0] {
        Update::Weather(pushed) => {
            assert_eq!(pushed.temperature_c, 14);
            assert_eq!(pushed.season, Season::Spring);
        }
        other => panic!("expected weather update, got {}", other.kind()),
    }
}

#[tokio::test]
async fn published_updates_reach_subscribers_in_order() {
    let state = test_app_state();
    let mut rx = state.feed.subscribe();

    state.set_weather(WeatherSnapshot::demo()).await;
    state.store.append("friend", "first").await.unwrap();
    state.publish(Update::Messages(state.store.all().await));

    assert_eq!(rx.recv().await.unwrap().kind(), "weather");
    match rx.recv().await.unwrap() {
        Update::Messages(log) => assert_eq!(log[0].message, "first"),
        other => panic!("expected messages update, got {}", other.kind()),
    }
}
