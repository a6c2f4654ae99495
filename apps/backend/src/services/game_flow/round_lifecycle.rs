use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use super::{persisted_entries, GameFlowService};
use crate::domain::round::{tally_key, voters_key};
use crate::domain::{resolve, Position, Resolution, RoundPhase, RoundState};
use crate::errors::domain::DomainError;

/// What one scheduler tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is finished; nothing changes any more.
    GameOver,
    /// The window of `round` is still open.
    Waiting { round: u64, remaining: Duration },
    /// Another tick is resolving the round right now.
    Busy,
    /// `round` closed without a decision; the board is unchanged.
    Skipped { round: u64 },
    /// `round` closed with `community_move` played.
    Advanced {
        round: u64,
        community_move: String,
        opponent_move: Option<String>,
        game_over: bool,
    },
}

/// Result of closing a round, before it is made durable.
struct Closing {
    position: Position,
    community_move: Option<String>,
    opponent_move: Option<String>,
}

impl GameFlowService {
    /// Advance the round if its window has expired at `now`.
    ///
    /// The round leaves `Open` under the game lock, so every vote either lands
    /// in the tally resolved here or is refused with `RoundMismatch`. Nothing
    /// is committed to memory until the store has accepted the new position and
    /// round; on a store failure the same round is reopened and the error
    /// returned, and the next tick tries again.
    pub async fn tick(&self, now: OffsetDateTime) -> Result<TickOutcome, DomainError> {
        let (closing, position) = {
            let mut state = self.state.lock().await;
            match state.round.phase {
                RoundPhase::GameOver => return Ok(TickOutcome::GameOver),
                RoundPhase::Resolving | RoundPhase::AwaitingOpponent => {
                    return Ok(TickOutcome::Busy)
                }
                RoundPhase::Open => {}
            }

            if !state.round.is_expired(now, self.config.voting_period) {
                return Ok(TickOutcome::Waiting {
                    round: state.round.number,
                    remaining: state
                        .round
                        .time_remaining(now, self.config.voting_period),
                });
            }

            state.round.phase = RoundPhase::Resolving;
            (state.round.clone(), state.position.clone())
        };

        match self.close_round(&closing, position, now).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!(round = closing.number, error = %err, "Round transition not persisted; reopening round");
                let mut state = self.state.lock().await;
                state.round.phase = RoundPhase::Open;
                Err(err)
            }
        }
    }

    async fn close_round(
        &self,
        closing: &RoundState,
        position: Position,
        now: OffsetDateTime,
    ) -> Result<TickOutcome, DomainError> {
        let round = closing.number;
        let tally = self.store.hash_entries(&tally_key(round)).await?;
        let result = self.play_round(round, position, &tally).await;

        let game_over = result.position.is_terminal();
        let next = closing.next(now, game_over);
        self.store
            .set_many(&persisted_entries(&result.position, &next))
            .await?;

        {
            let mut state = self.state.lock().await;
            state.position = result.position;
            state.round = next;
        }

        self.prune_round(round.saturating_sub(1)).await;

        if game_over {
            info!(round, "Game over");
        }

        Ok(match result.community_move {
            Some(community_move) => TickOutcome::Advanced {
                round,
                community_move,
                opponent_move: result.opponent_move,
                game_over,
            },
            None => TickOutcome::Skipped { round },
        })
    }

    /// Resolve the tally, play the community move and let the opponent answer.
    async fn play_round(
        &self,
        round: u64,
        position: Position,
        tally: &BTreeMap<String, u32>,
    ) -> Closing {
        let legal: BTreeSet<String> = position.legal_move_ids().into_iter().collect();

        let (uci, votes) = match resolve(tally, &legal) {
            Resolution::WinningMove { uci, votes } => (uci, votes),
            Resolution::NoDecision => {
                info!(round, "No votes cast; skipping round");
                return Closing {
                    position,
                    community_move: None,
                    opponent_move: None,
                };
            }
        };

        let after = match position.apply(&uci) {
            Ok(after) => after,
            Err(err) => {
                warn!(round, uci = %uci, error = %err, "Winning move no longer legal; skipping round");
                return Closing {
                    position,
                    community_move: None,
                    opponent_move: None,
                };
            }
        };
        info!(
            round,
            uci = %uci,
            san = position.notation(&uci).as_deref().unwrap_or("?"),
            votes,
            "Community move played"
        );

        if after.is_terminal() {
            return Closing {
                position: after,
                community_move: Some(uci),
                opponent_move: None,
            };
        }

        let (position, opponent_move) = self.consult_opponent(round, after).await;
        Closing {
            position,
            community_move: Some(uci),
            opponent_move,
        }
    }

    /// Drop the tally and voter set of `round`. Failures only leave garbage.
    async fn prune_round(&self, round: u64) {
        if round == 0 {
            return;
        }
        let keys = [tally_key(round), voters_key(round)];
        match self.store.delete(&keys).await {
            Ok(()) => debug!(round, "Pruned round records"),
            Err(err) => warn!(round, error = %err, "Failed to prune round records"),
        }
    }
}
