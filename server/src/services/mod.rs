//! Business-logic services shared by route handlers and background tasks.

pub mod refresh;
pub mod scene;
pub mod store;

/// Parse an environment variable, falling back to `default` when unset or
/// malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
