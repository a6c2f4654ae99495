use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tracing::info;

use crate::ai::{DisabledOpponent, OpponentAgent};
use crate::config::GameConfig;
use crate::domain::{Position, DEFAULT_OPENING};
use crate::error::AppError;
use crate::infra::store::{KeyValueStore, MemoryStore, RedisStore};
use crate::services::GameFlowService;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    game: GameConfig,
    redis_url: Option<String>,
    store: Option<Arc<dyn KeyValueStore>>,
    opponent: Option<Arc<dyn OpponentAgent>>,
    opponent_timeout: Option<Duration>,
    seed: Option<Position>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            game: GameConfig::default(),
            redis_url: None,
            store: None,
            opponent: None,
            opponent_timeout: None,
            seed: None,
        }
    }

    pub fn with_game_config(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Connect to Redis at build time instead of keeping state in memory.
    pub fn with_redis(mut self, redis_url: impl Into<String>) -> Self {
        self.redis_url = Some(redis_url.into());
        self
    }

    /// Use an already constructed store. Takes precedence over `with_redis`.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_opponent(mut self, opponent: Arc<dyn OpponentAgent>) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn with_opponent_timeout(mut self, timeout: Duration) -> Self {
        self.opponent_timeout = Some(timeout);
        self
    }

    /// Position used when the store holds no game yet.
    pub fn with_seed(mut self, seed: Position) -> Self {
        self.seed = Some(seed);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        self.build_at(OffsetDateTime::now_utc()).await
    }

    /// Build with an explicit clock reading for the first window.
    pub async fn build_at(self, now: OffsetDateTime) -> Result<AppState, AppError> {
        let store: Arc<dyn KeyValueStore> = match (self.store, self.redis_url) {
            (Some(store), _) => store,
            (None, Some(url)) => Arc::new(RedisStore::connect(&url).await.map_err(|e| {
                AppError::store_unavailable(format!("unable to connect to Redis: {e}"))
            })?),
            (None, None) => Arc::new(MemoryStore::new()),
        };
        info!(store = store.backend_name(), "State store ready");

        let opponent = self
            .opponent
            .unwrap_or_else(|| Arc::new(DisabledOpponent) as Arc<dyn OpponentAgent>);
        let seed = self
            .seed
            .unwrap_or_else(|| Position::with_opening(&DEFAULT_OPENING));

        let mut service = GameFlowService::load(store, opponent, self.game, seed, now).await?;
        if let Some(timeout) = self.opponent_timeout {
            service = service.with_opponent_timeout(timeout);
        }

        Ok(AppState::new(Arc::new(service)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
