use super::*;

use updates::Season;

#[test]
fn parse_full_payload() {
    let json = serde_json::json!({
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
        "main": { "temp": 11.3, "feels_like": 10.1, "humidity": 52, "pressure": 1012 },
        "wind": { "speed": 5.0, "deg": 270 },
        "name": "Lethbridge",
        "sys": { "country": "CA" }
    })
    .to_string();

    let snap = parse_response(&json).unwrap();
    assert_eq!(snap.condition, "Clear");
    assert_eq!(snap.description, "clear sky");
    assert_eq!(snap.temperature_c, 11);
    assert_eq!(snap.feels_like_c, 10);
    assert_eq!(snap.humidity, 52);
    // 5 m/s on the wire, km/h in the snapshot.
    assert!((snap.wind_kph - 18.0).abs() < 1e-9);
    assert_eq!(snap.city, "Lethbridge");
    assert_eq!(snap.region, "");
    assert_eq!(snap.country, "CA");
    assert_eq!(snap.season, Season::Spring);
}

#[test]
fn parse_missing_wind_defaults_to_calm() {
    let json = serde_json::json!({
        "weather": [{ "main": "Mist", "description": "mist" }],
        "main": { "temp": 2.0, "feels_like": 0.5, "humidity": 97 },
        "name": "Lethbridge",
        "sys": { "country": "CA" }
    })
    .to_string();

    let snap = parse_response(&json).unwrap();
    assert!((snap.wind_kph - 0.0).abs() < f64::EPSILON);
    assert_eq!(snap.season, Season::Fall);
}

#[test]
fn parse_empty_weather_array_errors() {
    let json = serde_json::json!({
        "weather": [],
        "main": { "temp": 2.0, "feels_like": 0.5, "humidity": 97 },
        "name": "Lethbridge",
        "sys": { "country": "CA" }
    })
    .to_string();

    assert!(matches!(parse_response(&json), Err(WeatherError::ApiParse(_))));
}
