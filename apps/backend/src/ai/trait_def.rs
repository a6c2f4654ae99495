//! Opponent trait definition.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Position;

/// Ways the opponent can fail to produce a move. All of them are absorbed by
/// the round lifecycle; none reaches a voter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpponentError {
    #[error("opponent timed out")]
    Timeout,
    #[error("opponent answered with HTTP {0}")]
    Status(u16),
    #[error("opponent response malformed: {0}")]
    Malformed(String),
    #[error("opponent declined to move")]
    NoMove,
    #[error("opponent suggested illegal move '{0}'")]
    IllegalMove(String),
    #[error("opponent transport error: {0}")]
    Transport(String),
    #[error("opponent disabled")]
    Disabled,
}

/// Automated reply to the community move.
///
/// Implementations get one attempt per round and must return a move that is
/// legal in `position`, as UCI.
#[async_trait]
pub trait OpponentAgent: Send + Sync {
    async fn best_move(&self, position: &Position) -> Result<String, OpponentError>;

    fn name(&self) -> &'static str;
}

/// Accept `uci` only if it is legal in `position`.
pub fn validate_suggestion(position: &Position, uci: &str) -> Result<String, OpponentError> {
    let uci = uci.trim();
    if position.is_legal(uci) {
        Ok(uci.to_string())
    } else {
        Err(OpponentError::IllegalMove(uci.to_string()))
    }
}
