//! Game flow service - the single owner of the shared game.
//!
//! Position and round bookkeeping live behind one async mutex; tallies and
//! voter sets live in the store under round-qualified keys. Votes enter
//! through [`GameFlowService::submit_vote`], round transitions through
//! [`GameFlowService::tick`], and reads through [`GameFlowService::view`].

mod ai_coordinator;
mod player_actions;
mod round_lifecycle;
mod snapshot;

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

pub use round_lifecycle::TickOutcome;

use crate::ai::OpponentAgent;
use crate::config::GameConfig;
use crate::domain::round::{
    from_unix_millis, to_unix_millis, FEN_KEY, ROUND_KEY, WINDOW_START_KEY,
};
use crate::domain::{Position, RoundPhase, RoundState};
use crate::errors::domain::DomainError;
use crate::infra::store::KeyValueStore;

const DEFAULT_OPPONENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct GameState {
    position: Position,
    round: RoundState,
}

pub struct GameFlowService {
    state: Mutex<GameState>,
    store: Arc<dyn KeyValueStore>,
    opponent: Arc<dyn OpponentAgent>,
    config: GameConfig,
    opponent_timeout: Duration,
}

impl GameFlowService {
    /// Rehydrate the game from `store`, seeding it with `seed` on first start.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        opponent: Arc<dyn OpponentAgent>,
        config: GameConfig,
        seed: Position,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let mut state = match store.get(FEN_KEY).await? {
            None => {
                let round = RoundState::first(now);
                store
                    .set_many(&persisted_entries(&seed, &round))
                    .await?;
                info!(round = round.number, fen = %seed.fen(), "Initialized new game");
                GameState {
                    position: seed,
                    round,
                }
            }
            Some(fen) => {
                let position = Position::from_fen(&fen)?;
                let number = match store.get(ROUND_KEY).await? {
                    Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                        DomainError::data_corruption(format!("{ROUND_KEY} '{raw}': {e}"))
                    })?,
                    None => 1,
                };
                let window_start = match store.get(WINDOW_START_KEY).await? {
                    Some(raw) => raw
                        .trim()
                        .parse::<i64>()
                        .ok()
                        .and_then(from_unix_millis)
                        .ok_or_else(|| {
                            DomainError::data_corruption(format!("{WINDOW_START_KEY} '{raw}'"))
                        })?,
                    None => now,
                };
                info!(round = number, fen = %fen, "Resumed game from store");
                GameState {
                    position,
                    round: RoundState {
                        number,
                        window_start,
                        phase: RoundPhase::Open,
                    },
                }
            }
        };

        if state.position.is_terminal() {
            state.round.phase = RoundPhase::GameOver;
        }

        Ok(Self {
            state: Mutex::new(state),
            store,
            opponent,
            config,
            opponent_timeout: DEFAULT_OPPONENT_TIMEOUT,
        })
    }

    /// Upper bound on one opponent consultation, whatever the agent does.
    pub fn with_opponent_timeout(mut self, timeout: Duration) -> Self {
        self.opponent_timeout = timeout;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub async fn current_round(&self) -> RoundState {
        self.state.lock().await.round.clone()
    }

    pub async fn position(&self) -> Position {
        self.state.lock().await.position.clone()
    }
}

/// The records that make a round transition durable.
fn persisted_entries(position: &Position, round: &RoundState) -> Vec<(String, String)> {
    vec![
        (FEN_KEY.to_string(), position.fen()),
        (ROUND_KEY.to_string(), round.number.to_string()),
        (
            WINDOW_START_KEY.to_string(),
            to_unix_millis(round.window_start).to_string(),
        ),
    ]
}
