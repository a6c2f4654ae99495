use std::sync::Arc;

use crate::services::GameFlowService;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// The one game all visitors vote on.
    pub game: Arc<GameFlowService>,
}

impl AppState {
    pub fn new(game: Arc<GameFlowService>) -> Self {
        Self { game }
    }
}
