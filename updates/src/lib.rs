//! Shared domain model and feed-frame types for the weather station.
//!
//! This crate owns the types that cross crate boundaries: the season
//! classification, the current-weather snapshot, the community message
//! record, and the [`Update`] frame pushed over the `/ws` feed. Both
//! `server` and `cli` depend on it so the wire shapes cannot drift.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Season`] from text.
#[derive(Debug, thiserror::Error)]
#[error("unknown season: {0}")]
pub struct ParseSeasonError(String);

// =============================================================================
// SEASON
// =============================================================================

/// Season bucket derived from the current temperature.
///
/// The thresholds are calibrated for southern Alberta: anything at or above
/// 20 °C reads as summer, and sub-zero reads as winter regardless of month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Spring,
    Fall,
    Winter,
}

impl Season {
    /// Classify a rounded temperature in °C.
    ///
    /// - `>= 20` → [`Season::Summer`]
    /// - `10..=19` → [`Season::Spring`]
    /// - `0..=9` → [`Season::Fall`]
    /// - `< 0` → [`Season::Winter`]
    #[must_use]
    pub fn from_temp_c(temp_c: i32) -> Self {
        if temp_c >= 20 {
            Self::Summer
        } else if temp_c >= 10 {
            Self::Spring
        } else if temp_c >= 0 {
            Self::Fall
        } else {
            Self::Winter
        }
    }

    /// Lowercase name, used in JSON payloads and asset folder paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Spring => "spring",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }

    /// All seasons, in classification order (hot to cold).
    pub const ALL: [Self; 4] = [Self::Summer, Self::Spring, Self::Fall, Self::Winter];
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summer" => Ok(Self::Summer),
            "spring" => Ok(Self::Spring),
            "fall" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            other => Err(ParseSeasonError(other.to_owned())),
        }
    }
}

// =============================================================================
// WEATHER SNAPSHOT
// =============================================================================

/// A current-conditions observation, normalized across providers.
///
/// Temperatures are rounded whole °C and `season` is always derived from
/// `temperature_c`, so consumers never re-run the classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Short condition text, e.g. `"Sunny"` or `"Light snow"`.
    pub condition: String,
    /// Longer provider description; falls back to the condition text.
    pub description: String,
    /// Rounded air temperature in °C.
    pub temperature_c: i32,
    /// Rounded apparent temperature in °C.
    pub feels_like_c: i32,
    /// Relative humidity, 0–100.
    pub humidity: u8,
    /// Wind speed in km/h.
    pub wind_kph: f64,
    pub city: String,
    pub region: String,
    pub country: String,
    /// Derived from `temperature_c` via [`Season::from_temp_c`].
    pub season: Season,
}

impl WeatherSnapshot {
    /// Build a snapshot from raw readings, deriving the season.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_readings(
        condition: String,
        description: String,
        temperature_c: i32,
        feels_like_c: i32,
        humidity: u8,
        wind_kph: f64,
        city: String,
        region: String,
        country: String,
    ) -> Self {
        Self {
            condition,
            description,
            temperature_c,
            feels_like_c,
            humidity,
            wind_kph,
            city,
            region,
            country,
            season: Season::from_temp_c(temperature_c),
        }
    }

    /// Canned observation served until the first successful fetch, or when
    /// no provider key is configured at all.
    #[must_use]
    pub fn demo() -> Self {
        Self::from_readings(
            "Demo Mode".to_owned(),
            "no weather provider configured".to_owned(),
            20,
            20,
            50,
            0.0,
            "Lethbridge".to_owned(),
            "Alberta".to_owned(),
            "Canada".to_owned(),
        )
    }
}

// =============================================================================
// MESSAGE RECORD
// =============================================================================

/// One community message as stored in `messages.json` and served by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Short 8-character token (truncated UUIDv4).
    pub id: String,
    /// Display name; older files wrote this field as `name`.
    #[serde(alias = "name")]
    pub username: String,
    pub message: String,
    /// RFC 3339 local-clock stamp, kept for display.
    pub timestamp: String,
    /// Seconds since the Unix epoch, kept for ordering and cycling math.
    pub unix_time: i64,
}

// =============================================================================
// FEED FRAME
// =============================================================================

/// A frame pushed over the `/ws` feed.
///
/// Serializes as `{"type": "weather"|"messages", "data": ...}`, the shape
/// the web page and `cli watch --follow` both consume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Update {
    /// The current weather snapshot changed (or a subscriber just connected).
    Weather(WeatherSnapshot),
    /// The message log changed; carries the full retained log, newest last.
    Messages(Vec<MessageRecord>),
}

impl Update {
    /// Frame type tag as it appears on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Weather(_) => "weather",
            Self::Messages(_) => "messages",
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
