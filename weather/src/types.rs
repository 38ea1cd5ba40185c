//! Provider-neutral weather lookup types and errors.

use updates::WeatherSnapshot;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by weather client operations.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the weather provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The weather provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The weather provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl WeatherError {
    /// Whether a retry on the next refresh cycle could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// LOOKUP TRAIT
// =============================================================================

/// Provider-neutral async trait for current-conditions lookup. Enables
/// mocking the upstream API in tests.
#[async_trait::async_trait]
pub trait CurrentWeather: Send + Sync {
    /// Fetch the current observation for the configured city.
    ///
    /// # Errors
    ///
    /// Returns a [`WeatherError`] if the request fails, the response is
    /// malformed, or the API key is absent.
    async fn current(&self) -> Result<WeatherSnapshot, WeatherError>;

    /// The city this client resolves, as passed to the provider.
    fn city(&self) -> &str;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
