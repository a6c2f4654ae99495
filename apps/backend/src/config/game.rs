use std::time::Duration;

use super::parse_or;
use crate::error::AppError;

/// Voting cadence.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Length of one voting window.
    pub voting_period: Duration,
    /// How often the scheduler re-checks the window.
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            voting_period: Duration::from_secs(3 * 60 * 60),
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl GameConfig {
    pub(super) fn from_lookup<F>(lookup: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let period_secs = parse_or(lookup, "VOTING_PERIOD_SECS", defaults.voting_period.as_secs())?;
        if period_secs == 0 {
            return Err(AppError::config("VOTING_PERIOD_SECS must be positive"));
        }
        let tick_ms = parse_or(
            lookup,
            "TICK_INTERVAL_MS",
            defaults.tick_interval.as_millis() as u64,
        )?;
        if tick_ms == 0 {
            return Err(AppError::config("TICK_INTERVAL_MS must be positive"));
        }

        Ok(Self {
            voting_period: Duration::from_secs(period_secs),
            tick_interval: Duration::from_millis(tick_ms),
        })
    }
}
