//! Round bookkeeping: numbering, phases, voting window and store keys.

use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;

/// Store key of the serialized board.
pub const FEN_KEY: &str = "fen";
/// Store key of the current round number.
pub const ROUND_KEY: &str = "current_round";
/// Store key of the open window's start, unix milliseconds.
pub const WINDOW_START_KEY: &str = "window_start";

/// Tally hash for `round`: move UCI -> vote count.
pub fn tally_key(round: u64) -> String {
    format!("votes:{round}")
}

/// Voter set for `round`: visitor identities that already voted.
pub fn voters_key(round: u64) -> String {
    format!("votes_record:{round}")
}

/// Lifecycle of the round currently held by the game flow service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Accepting votes.
    Open,
    /// Window expired; tally snapshotted and community move being applied.
    Resolving,
    /// Community move applied; waiting on the opponent engine.
    AwaitingOpponent,
    /// Game finished. Terminal.
    GameOver,
}

impl RoundPhase {
    pub fn accepts_votes(self) -> bool {
        matches!(self, RoundPhase::Open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub number: u64,
    pub window_start: OffsetDateTime,
    pub phase: RoundPhase,
}

impl RoundState {
    pub fn first(now: OffsetDateTime) -> Self {
        Self {
            number: 1,
            window_start: now,
            phase: RoundPhase::Open,
        }
    }

    /// The round that follows this one, opening at `now`.
    pub fn next(&self, now: OffsetDateTime, game_over: bool) -> Self {
        Self {
            number: self.number + 1,
            window_start: now,
            phase: if game_over {
                RoundPhase::GameOver
            } else {
                RoundPhase::Open
            },
        }
    }

    pub fn elapsed(&self, now: OffsetDateTime) -> Duration {
        let elapsed = now - self.window_start;
        if elapsed.is_negative() {
            Duration::ZERO
        } else {
            elapsed.unsigned_abs()
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime, voting_period: Duration) -> bool {
        self.elapsed(now) >= voting_period
    }

    /// Time left in the window, clamped at zero.
    pub fn time_remaining(&self, now: OffsetDateTime, voting_period: Duration) -> Duration {
        voting_period.saturating_sub(self.elapsed(now))
    }
}

/// Milliseconds since the unix epoch, as persisted under [`WINDOW_START_KEY`].
pub fn to_unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn from_unix_millis(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

/// `"{h}h {m}m"` rendering used by the page countdown.
pub fn format_time_left(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn keys_are_round_qualified() {
        assert_eq!(tally_key(7), "votes:7");
        assert_eq!(voters_key(7), "votes_record:7");
    }

    #[test]
    fn remaining_time_clamps_at_zero() {
        let round = RoundState::first(datetime!(2024-01-01 00:00 UTC));
        let period = Duration::from_secs(10);
        assert_eq!(
            round.time_remaining(datetime!(2024-01-01 00:00:04 UTC), period),
            Duration::from_secs(6)
        );
        assert_eq!(
            round.time_remaining(datetime!(2024-01-01 01:00 UTC), period),
            Duration::ZERO
        );
        // clock stepping backwards never inflates the window
        assert_eq!(
            round.time_remaining(datetime!(2023-12-31 23:59 UTC), period),
            period
        );
    }

    #[test]
    fn expiry_is_inclusive() {
        let round = RoundState::first(datetime!(2024-01-01 00:00 UTC));
        let period = Duration::from_secs(2);
        assert!(!round.is_expired(datetime!(2024-01-01 00:00:01 UTC), period));
        assert!(round.is_expired(datetime!(2024-01-01 00:00:02 UTC), period));
    }

    #[test]
    fn next_round_bumps_number_and_window() {
        let round = RoundState::first(datetime!(2024-01-01 00:00 UTC));
        let next = round.next(datetime!(2024-01-01 03:00 UTC), false);
        assert_eq!(next.number, 2);
        assert_eq!(next.window_start, datetime!(2024-01-01 03:00 UTC));
        assert_eq!(next.phase, RoundPhase::Open);
        assert_eq!(
            round.next(datetime!(2024-01-01 03:00 UTC), true).phase,
            RoundPhase::GameOver
        );
    }

    #[test]
    fn unix_millis_round_trip() {
        let at = datetime!(2024-05-06 07:08:09.123 UTC);
        assert_eq!(from_unix_millis(to_unix_millis(at)), Some(at));
    }

    #[test]
    fn time_left_formatting() {
        assert_eq!(format_time_left(Duration::from_secs(10_800)), "3h 0m");
        assert_eq!(format_time_left(Duration::from_secs(3_725)), "1h 2m");
        assert_eq!(format_time_left(Duration::ZERO), "0h 0m");
    }
}
