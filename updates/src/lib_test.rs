use super::*;

#[test]
fn season_thresholds() {
    assert_eq!(Season::from_temp_c(35), Season::Summer);
    assert_eq!(Season::from_temp_c(20), Season::Summer);
    assert_eq!(Season::from_temp_c(19), Season::Spring);
    assert_eq!(Season::from_temp_c(10), Season::Spring);
    assert_eq!(Season::from_temp_c(9), Season::Fall);
    assert_eq!(Season::from_temp_c(0), Season::Fall);
    assert_eq!(Season::from_temp_c(-1), Season::Winter);
    assert_eq!(Season::from_temp_c(-40), Season::Winter);
}

#[test]
fn season_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&Season::Fall).unwrap(), "\"fall\"");
    let parsed: Season = serde_json::from_str("\"winter\"").unwrap();
    assert_eq!(parsed, Season::Winter);
}

#[test]
fn season_round_trips_from_str() {
    for season in Season::ALL {
        assert_eq!(season.as_str().parse::<Season>().unwrap(), season);
    }
    assert!("autumn".parse::<Season>().is_err());
}

#[test]
fn snapshot_derives_season_from_temperature() {
    let snap = WeatherSnapshot::from_readings(
        "Sunny".into(),
        "clear sky".into(),
        24,
        26,
        45,
        12.0,
        "Lethbridge".into(),
        "Alberta".into(),
        "Canada".into(),
    );
    assert_eq!(snap.season, Season::Summer);

    let cold = WeatherSnapshot::from_readings(
        "Snow".into(),
        "light snow".into(),
        -12,
        -18,
        80,
        25.0,
        "Lethbridge".into(),
        "Alberta".into(),
        "Canada".into(),
    );
    assert_eq!(cold.season, Season::Winter);
}

#[test]
fn demo_snapshot_is_summer_lethbridge() {
    let demo = WeatherSnapshot::demo();
    assert_eq!(demo.condition, "Demo Mode");
    assert_eq!(demo.temperature_c, 20);
    assert_eq!(demo.season, Season::Summer);
    assert_eq!(demo.city, "Lethbridge");
}

#[test]
fn message_record_accepts_name_alias() {
    let json = r#"{
        "id": "a1b2c3d4",
        "name": "System",
        "message": "Welcome!",
        "timestamp": "2024-05-01T12:00:00Z",
        "unix_time": 1714564800
    }"#;
    let record: MessageRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.username, "System");

    let out = serde_json::to_value(&record).unwrap();
    assert!(out.get("username").is_some());
    assert!(out.get("name").is_none());
}

#[test]
fn update_frame_wire_shape() {
    let update = Update::Weather(WeatherSnapshot::demo());
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("weather"));
    assert_eq!(
        value
            .get("data")
            .and_then(|d| d.get("temperature_c"))
            .and_then(serde_json::Value::as_i64),
        Some(20)
    );

    let messages = Update::Messages(vec![]);
    assert_eq!(messages.kind(), "messages");
    let value = serde_json::to_value(&messages).unwrap();
    assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("messages"));

    let round: Update = serde_json::from_value(value).unwrap();
    assert_eq!(round, Update::Messages(vec![]));
}
