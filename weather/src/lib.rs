//! Weather — multi-provider current-conditions lookup.
//!
//! DESIGN
//! ======
//! Two hosted providers answer the same question ("what is it like in the
//! configured city right now?") with different payloads. The
//! [`WeatherClient`] enum dispatches to WeatherAPI.com or OpenWeatherMap
//! based on `WEATHER_PROVIDER` and normalizes both into a
//! [`updates::WeatherSnapshot`], so everything downstream is
//! provider-agnostic.

pub mod config;
pub mod openweather;
pub mod types;
pub mod weatherapi;

use config::{WeatherConfig, WeatherProviderKind};
pub use types::{CurrentWeather, WeatherError};
use updates::WeatherSnapshot;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete weather client that dispatches to either provider.
///
/// Configured from environment variables by [`WeatherClient::from_env`].
pub struct WeatherClient {
    inner: Provider,
    city: String,
    provider: WeatherProviderKind,
}

enum Provider {
    WeatherApi(weatherapi::WeatherApiClient),
    OpenWeather(openweather::OpenWeatherClient),
}

impl WeatherClient {
    /// Build a weather client from environment variables.
    ///
    /// - `WEATHER_PROVIDER`: "weatherapi" (default) or "openweather"
    /// - `WEATHERAPI_KEY` / `OPENWEATHER_API_KEY`: the active provider's key
    /// - `WEATHER_CITY`: city query string (default "Lethbridge, Alberta")
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, WeatherError> {
        let config = WeatherConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build a client for a specific provider, reading the rest of the
    /// config from the environment. Used by the fallback chain.
    ///
    /// # Errors
    ///
    /// Returns an error if that provider's key is missing or the HTTP
    /// client fails.
    pub fn for_provider(provider: WeatherProviderKind) -> Result<Self, WeatherError> {
        Self::from_config(WeatherConfig::for_provider(provider)?)
    }

    /// Build a weather client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: WeatherConfig) -> Result<Self, WeatherError> {
        let inner = match config.provider {
            WeatherProviderKind::WeatherApi => {
                Provider::WeatherApi(weatherapi::WeatherApiClient::new(config.api_key, config.timeouts)?)
            }
            WeatherProviderKind::OpenWeather => {
                Provider::OpenWeather(openweather::OpenWeatherClient::new(config.api_key, config.timeouts)?)
            }
        };
        Ok(Self { inner, city: config.city, provider: config.provider })
    }

    /// Which upstream provider this client talks to.
    #[must_use]
    pub fn provider(&self) -> WeatherProviderKind {
        self.provider
    }

    async fn current_inner(&self) -> Result<WeatherSnapshot, WeatherError> {
        match &self.inner {
            Provider::WeatherApi(c) => c.current(&self.city).await,
            Provider::OpenWeather(c) => c.current(&self.city).await,
        }
    }
}

#[async_trait::async_trait]
impl CurrentWeather for WeatherClient {
    async fn current(&self) -> Result<WeatherSnapshot, WeatherError> {
        self.current_inner().await
    }

    fn city(&self) -> &str {
        &self.city
    }
}
