//! OpenWeatherMap current-conditions client.
//!
//! Thin HTTP wrapper for `/data/2.5/weather` with `units=metric`. Pure
//! parsing in `parse_response` for testability.

use std::time::Duration;

use updates::WeatherSnapshot;

use super::config::WeatherTimeouts;
use super::types::WeatherError;
use super::weatherapi::{clamp_humidity, round_c};

const API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

// Provider reports wind in m/s under metric units; snapshots carry km/h.
const MPS_TO_KPH: f64 = 3.6;

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, timeouts: WeatherTimeouts) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| WeatherError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    pub async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let response = self
            .http
            .get(API_URL)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| WeatherError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(WeatherError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
struct ApiResponse {
    weather: Vec<ConditionEntry>,
    main: Readings,
    #[serde(default)]
    wind: Wind,
    name: String,
    sys: Sys,
}

#[derive(serde::Deserialize)]
struct ConditionEntry {
    main: String,
    description: String,
}

#[derive(serde::Deserialize)]
struct Readings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(serde::Deserialize, Default)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

#[derive(serde::Deserialize)]
struct Sys {
    country: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<WeatherSnapshot, WeatherError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| WeatherError::ApiParse(e.to_string()))?;

    let Some(entry) = api.weather.first() else {
        return Err(WeatherError::ApiParse("empty weather array".to_owned()));
    };

    // OpenWeatherMap has no region field in this payload.
    Ok(WeatherSnapshot::from_readings(
        entry.main.clone(),
        entry.description.clone(),
        round_c(api.main.temp),
        round_c(api.main.feels_like),
        clamp_humidity(api.main.humidity),
        api.wind.speed * MPS_TO_KPH,
        api.name,
        String::new(),
        api.sys.country,
    ))
}

#[cfg(test)]
#[path = "openweather_test.rs"]
mod tests;
