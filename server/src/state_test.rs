use super::*;

use updates::Season;

#[tokio::test]
async fn state_starts_with_demo_snapshot() {
    let state = test_helpers::test_app_state();
    let snap = state.snapshot().await;
    assert_eq!(snap.condition, "Demo Mode");
    assert_eq!(snap.season, Season::Summer);
}

#[tokio::test]
async fn set_weather_updates_cache_and_broadcasts() {
    let state = test_helpers::test_app_state();
    let mut rx = state.feed.subscribe();

    let mut snap = WeatherSnapshot::demo();
    snap.condition = "Blizzard".into();
    snap.temperature_c = -20;
    snap.season = Season::Winter;
    state.set_weather(snap.clone()).await;

    assert_eq!(state.snapshot().await, snap);
    match rx.recv().await.expect("feed frame") {
        Update::Weather(pushed) => assert_eq!(pushed, snap),
        other => panic!("expected weather update, got {}", other.kind()),
    }
}

#[tokio::test]
async fn publish_without_subscribers_is_quiet() {
    let state = test_helpers::test_app_state();
    // Must not error or panic when nobody is listening.
    state.publish(Update::Messages(vec![]));
}
