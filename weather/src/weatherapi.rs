//! WeatherAPI.com current-conditions client.
//!
//! Thin HTTP wrapper for `/v1/current.json`. Pure parsing in
//! `parse_response` for testability.

use std::time::Duration;

use updates::WeatherSnapshot;

use super::config::WeatherTimeouts;
use super::types::WeatherError;

const API_URL: &str = "http://api.weatherapi.com/v1/current.json";

// =============================================================================
// CLIENT
// =============================================================================

pub struct WeatherApiClient {
    http: reqwest::Client,
    api_key: String,
}

impl WeatherApiClient {
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
            .query(&[("key", self.api_key.as_str()), ("q", city), ("aqi", "no")])
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
    location: Location,
    current: Current,
}

#[derive(serde::Deserialize)]
struct Location {
    name: String,
    region: String,
    country: String,
}

#[derive(serde::Deserialize)]
struct Current {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_kph: f64,
    condition: Condition,
}

#[derive(serde::Deserialize)]
struct Condition {
    text: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<WeatherSnapshot, WeatherError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| WeatherError::ApiParse(e.to_string()))?;

    let condition = api.current.condition.text;
    let description = condition.to_lowercase();

    Ok(WeatherSnapshot::from_readings(
        condition.clone(),
        description,
        round_c(api.current.temp_c),
        round_c(api.current.feelslike_c),
        clamp_humidity(api.current.humidity),
        api.current.wind_kph,
        api.location.name,
        api.location.region,
        api.location.country,
    ))
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_c(value: f64) -> i32 {
    value.round() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn clamp_humidity(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
#[path = "weatherapi_test.rs"]
mod tests;
