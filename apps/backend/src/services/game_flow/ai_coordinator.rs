use tracing::{info, warn};

use super::GameFlowService;
use crate::ai::{validate_suggestion, OpponentError};
use crate::domain::{Position, RoundPhase};

impl GameFlowService {
    /// Ask the opponent for one reply to `position` and play it.
    ///
    /// Any failure leaves `position` as it is: the community move already
    /// stands and the round advances regardless. There is exactly one attempt,
    /// bounded by the service's opponent timeout.
    pub(super) async fn consult_opponent(
        &self,
        round: u64,
        position: Position,
    ) -> (Position, Option<String>) {
        self.state.lock().await.round.phase = RoundPhase::AwaitingOpponent;

        let suggestion =
            match tokio::time::timeout(self.opponent_timeout, self.opponent.best_move(&position))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(OpponentError::Timeout),
            };

        let played = suggestion
            .and_then(|uci| validate_suggestion(&position, &uci))
            .and_then(|uci| match position.apply(&uci) {
                Ok(after) => Ok((after, uci)),
                Err(_) => Err(OpponentError::IllegalMove(uci)),
            });

        match played {
            Ok((after, uci)) => {
                info!(
                    round,
                    uci = %uci,
                    opponent = self.opponent.name(),
                    "Opponent move played"
                );
                (after, Some(uci))
            }
            Err(OpponentError::Disabled) => (position, None),
            Err(err) => {
                warn!(
                    round,
                    opponent = self.opponent.name(),
                    error = %err,
                    "Opponent unavailable; advancing without a reply"
                );
                (position, None)
            }
        }
    }
}
