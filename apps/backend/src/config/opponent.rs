use std::time::Duration;

use super::parse_or;
use crate::error::AppError;

pub const DEFAULT_OPPONENT_URL: &str = "https://chess-api.com/v1";

#[derive(Debug, Clone)]
pub struct OpponentConfig {
    /// Best-move endpoint; `None` when the opponent is switched off.
    pub url: Option<String>,
    /// Hard cap on the single request made per round.
    pub timeout: Duration,
    pub depth: u8,
    pub max_thinking_ms: u64,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_OPPONENT_URL.to_string()),
            timeout: Duration::from_secs(5),
            depth: 6,
            max_thinking_ms: 50,
        }
    }
}

impl OpponentConfig {
    pub(super) fn from_lookup<F>(lookup: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let url = match lookup("OPPONENT_URL").map(|u| u.trim().to_string()) {
            Some(u) if u.eq_ignore_ascii_case("off") || u.is_empty() => None,
            Some(u) => Some(u),
            None => defaults.url,
        };
        let timeout_ms = parse_or(
            lookup,
            "OPPONENT_TIMEOUT_MS",
            defaults.timeout.as_millis() as u64,
        )?;
        if timeout_ms == 0 {
            return Err(AppError::config("OPPONENT_TIMEOUT_MS must be positive"));
        }

        Ok(Self {
            url,
            timeout: Duration::from_millis(timeout_ms),
            depth: parse_or(lookup, "OPPONENT_DEPTH", defaults.depth)?,
            max_thinking_ms: parse_or(lookup, "OPPONENT_MAX_THINKING_MS", defaults.max_thinking_ms)?,
        })
    }
}
