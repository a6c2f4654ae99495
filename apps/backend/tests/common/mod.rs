#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use crowd_chess::ai::OpponentAgent;
use crowd_chess::config::GameConfig;
use crowd_chess::domain::Position;
use crowd_chess::infra::store::MemoryStore;
use crowd_chess::GameFlowService;
use time::macros::datetime;
use time::OffsetDateTime;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Fixed clock reading at which test games open their first window.
pub const T0: OffsetDateTime = datetime!(2024-03-01 09:00 UTC);

/// Two-second voting windows, fast ticks.
pub fn short_rounds() -> GameConfig {
    GameConfig {
        voting_period: Duration::from_secs(2),
        tick_interval: Duration::from_millis(50),
    }
}

pub fn at(secs: i64) -> OffsetDateTime {
    T0 + time::Duration::seconds(secs)
}

/// Game from `seed` over a fresh memory store, first window opening at `T0`.
pub async fn game_with(
    store: Arc<MemoryStore>,
    opponent: Arc<dyn OpponentAgent>,
    seed: Position,
) -> GameFlowService {
    GameFlowService::load(store, opponent, short_rounds(), seed, T0)
        .await
        .expect("game should load")
        .with_opponent_timeout(Duration::from_millis(200))
}
