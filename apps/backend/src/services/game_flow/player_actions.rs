use tracing::debug;

use super::GameFlowService;
use crate::domain::round::{tally_key, voters_key};
use crate::domain::{RoundPhase, VoteOutcome, VoteRejection};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::store::vote_count;
use crate::logging::pii::Redacted;

impl GameFlowService {
    /// Record one vote for `uci` on behalf of `identity`.
    ///
    /// `round_hint` is the round the caller last saw; `None` means "whatever
    /// round is open". The game lock is held from the phase check through the
    /// store write, so a vote either lands in the round the scheduler later
    /// resolves or is rejected with `RoundMismatch`.
    ///
    /// Only store failures are returned as `Err`; every other refusal is a
    /// [`VoteRejection`] and leaves all state untouched.
    pub async fn submit_vote(
        &self,
        round_hint: Option<u64>,
        identity: &str,
        uci: &str,
    ) -> Result<VoteOutcome, DomainError> {
        if identity.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("EMPTY_IDENTITY".into()),
                "visitor identity is required",
            ));
        }

        let state = self.state.lock().await;
        let current = state.round.number;

        match state.round.phase {
            RoundPhase::Open => {}
            RoundPhase::GameOver => {
                return Ok(VoteOutcome::Rejected(VoteRejection::IllegalMove));
            }
            RoundPhase::Resolving | RoundPhase::AwaitingOpponent => {
                debug!(round = current, "Vote arrived while round is closing");
                return Ok(VoteOutcome::Rejected(VoteRejection::RoundMismatch {
                    current_round: current,
                }));
            }
        }

        if round_hint.is_some_and(|hint| hint != current) {
            debug!(round = current, hint = ?round_hint, "Stale round reference");
            return Ok(VoteOutcome::Rejected(VoteRejection::RoundMismatch {
                current_round: current,
            }));
        }

        let Some(canonical) = state.position.canonical_uci(uci) else {
            debug!(round = current, uci, "Rejected illegal move");
            return Ok(VoteOutcome::Rejected(VoteRejection::IllegalMove));
        };

        let tally = tally_key(current);
        let recorded = self
            .store
            .record_vote(&voters_key(current), identity, &tally, &canonical)
            .await?;
        drop(state);

        match recorded {
            Some(count) => {
                debug!(
                    round = current,
                    uci = %canonical,
                    visitor = %Redacted(identity),
                    votes = count,
                    "Vote accepted"
                );
                Ok(VoteOutcome::Accepted {
                    round: current,
                    move_votes: vote_count(&tally, &canonical, count)?,
                    uci: canonical,
                })
            }
            None => {
                debug!(round = current, visitor = %Redacted(identity), "Duplicate vote");
                Ok(VoteOutcome::Rejected(VoteRejection::DuplicateVote))
            }
        }
    }
}
