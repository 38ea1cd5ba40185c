//! Weather configuration parsed from environment variables.

use super::types::WeatherError;

pub const DEFAULT_CITY: &str = "Lethbridge, Alberta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherProviderKind {
    WeatherApi,
    OpenWeather,
}

impl WeatherProviderKind {
    /// The environment variable holding this provider's API key. The names
    /// match what the hosted dashboards hand out, so keys can be pasted
    /// into `.env` unchanged.
    #[must_use]
    pub fn key_var(self) -> &'static str {
        match self {
            Self::WeatherApi => "WEATHERAPI_KEY",
            Self::OpenWeather => "OPENWEATHER_API_KEY",
        }
    }

    /// Provider name as accepted by `WEATHER_PROVIDER`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeatherApi => "weatherapi",
            Self::OpenWeather => "openweather",
        }
    }

    /// The other provider, used as a fallback when this one has no key.
    #[must_use]
    pub fn fallback(self) -> Self {
        match self {
            Self::WeatherApi => Self::OpenWeather,
            Self::OpenWeather => Self::WeatherApi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub provider: WeatherProviderKind,
    pub api_key: String,
    pub city: String,
    pub timeouts: WeatherTimeouts,
}

impl WeatherConfig {
    /// Build typed weather config from environment variables.
    ///
    /// Required:
    /// - the configured provider's key var (`WEATHERAPI_KEY` or
    ///   `OPENWEATHER_API_KEY`)
    ///
    /// Optional:
    /// - `WEATHER_PROVIDER`: `weatherapi` (default) or `openweather`
    /// - `WEATHER_CITY`: default `"Lethbridge, Alberta"`
    /// - `WEATHER_REQUEST_TIMEOUT_SECS`: default 10
    /// - `WEATHER_CONNECT_TIMEOUT_SECS`: default 5
    pub fn from_env() -> Result<Self, WeatherError> {
        Self::for_provider(provider_from_env()?)
    }

    /// Build config for a specific provider, still reading the key, city,
    /// and timeouts from the environment.
    pub fn for_provider(provider: WeatherProviderKind) -> Result<Self, WeatherError> {
        let key_var = provider.key_var();
        let api_key =
            std::env::var(key_var).map_err(|_| WeatherError::MissingApiKey { var: key_var.to_owned() })?;
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey { var: key_var.to_owned() });
        }

        let city = std::env::var("WEATHER_CITY").unwrap_or_else(|_| DEFAULT_CITY.to_owned());
        let timeouts = WeatherTimeouts {
            request_secs: env_parse("WEATHER_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("WEATHER_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, city, timeouts })
    }
}

/// The provider selected by `WEATHER_PROVIDER`, defaulting to WeatherAPI.
/// Exposed so callers can build a fallback chain before reading any key.
pub fn provider_from_env() -> Result<WeatherProviderKind, WeatherError> {
    parse_provider(std::env::var("WEATHER_PROVIDER").ok().as_deref())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_provider(raw: Option<&str>) -> Result<WeatherProviderKind, WeatherError> {
    match raw.unwrap_or("weatherapi") {
        "weatherapi" => Ok(WeatherProviderKind::WeatherApi),
        "openweather" => Ok(WeatherProviderKind::OpenWeather),
        other => Err(WeatherError::ConfigParse(format!("unknown WEATHER_PROVIDER: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
