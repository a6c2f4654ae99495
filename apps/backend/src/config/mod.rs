//! Application configuration loaded once from environment variables.

mod game;
mod opponent;

use std::env;
use std::str::FromStr;

pub use game::GameConfig;
pub use opponent::OpponentConfig;

use crate::error::AppError;

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    /// Redis connection string; `None` keeps all state in process memory.
    pub redis_url: Option<String>,

    pub game: GameConfig,
    pub opponent: OpponentConfig,
}

impl AppConfig {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "BACKEND_PORT", 3001u16)?;

        let redis_url = lookup("REDIS_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            host,
            port,
            redis_url,
            game: GameConfig::from_lookup(&lookup)?,
            opponent: OpponentConfig::from_lookup(&lookup)?,
        })
    }
}

/// Parse `name` when present, otherwise fall back to `default`.
pub(crate) fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::config(format!("{name} is invalid ('{raw}'): {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert!(config.redis_url.is_none());
        assert_eq!(config.game.voting_period, Duration::from_secs(10_800));
        assert_eq!(config.game.tick_interval, Duration::from_secs(1));
        assert_eq!(
            config.opponent.url.as_deref(),
            Some("https://chess-api.com/v1")
        );
        assert_eq!(config.opponent.timeout, Duration::from_secs(5));
        assert_eq!(config.opponent.depth, 6);
        assert_eq!(config.opponent.max_thinking_ms, 50);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BACKEND_PORT", "8080"),
            ("REDIS_URL", "redis://localhost:6379"),
            ("VOTING_PERIOD_SECS", "60"),
            ("TICK_INTERVAL_MS", "250"),
            ("OPPONENT_URL", "off"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.game.voting_period, Duration::from_secs(60));
        assert_eq!(config.game.tick_interval, Duration::from_millis(250));
        assert!(config.opponent.url.is_none());
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = AppConfig::from_lookup(lookup_from(&[("BACKEND_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));

        let err =
            AppConfig::from_lookup(lookup_from(&[("VOTING_PERIOD_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("VOTING_PERIOD_SECS"));
    }

    #[test]
    fn zero_opponent_timeout_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup_from(&[("OPPONENT_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("OPPONENT_TIMEOUT_MS"));
    }

    #[test]
    fn blank_redis_url_means_memory_store() {
        let config = AppConfig::from_lookup(lookup_from(&[("REDIS_URL", "  ")])).unwrap();
        assert!(config.redis_url.is_none());
    }
}
