use async_trait::async_trait;

use super::{OpponentAgent, OpponentError};
use crate::domain::Position;

/// Opponent that never moves; the community plays both sides.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledOpponent;

#[async_trait]
impl OpponentAgent for DisabledOpponent {
    async fn best_move(&self, _position: &Position) -> Result<String, OpponentError> {
        Err(OpponentError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
