use std::collections::BTreeMap;
use std::time::Duration;

use time::OffsetDateTime;

use super::GameFlowService;
use crate::domain::round::{format_time_left, tally_key};
use crate::domain::GameView;
use crate::errors::domain::DomainError;

impl GameFlowService {
    /// Read-only projection of the game at `now`.
    ///
    /// Time left is zero whenever the round is not accepting votes.
    pub async fn view(&self, now: OffsetDateTime) -> Result<GameView, DomainError> {
        let (position, round) = {
            let state = self.state.lock().await;
            (state.position.clone(), state.round.clone())
        };

        let votes = self.tally(round.number).await?;
        let total_votes = votes.values().sum();
        let remaining = if round.phase.accepts_votes() {
            round.time_remaining(now, self.config.voting_period)
        } else {
            Duration::ZERO
        };

        Ok(GameView {
            fen: position.fen(),
            round: round.number,
            phase: round.phase,
            side_to_move: position.side_to_move(),
            legal_moves: position.legal_moves(),
            votes,
            total_votes,
            time_left: remaining.as_secs(),
            formatted_time_left: format_time_left(remaining),
            voting_duration: self.config.voting_period.as_secs(),
            game_over: position.is_terminal(),
        })
    }

    /// Current counts of `round`, keyed by UCI.
    pub async fn tally(&self, round: u64) -> Result<BTreeMap<String, u32>, DomainError> {
        Ok(self.store.hash_entries(&tally_key(round)).await?)
    }
}
