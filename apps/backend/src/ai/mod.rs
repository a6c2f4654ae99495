//! Opponent module - the automated side answering each community move.
//!
//! This module provides:
//! - `OpponentAgent`, the seam the round lifecycle calls through
//! - `ChessApiOpponent`: remote best-move engine over HTTP
//! - `DisabledOpponent`: never moves
//! - `create_opponent`, choosing one from configuration

mod chess_api;
mod disabled;
mod trait_def;

use std::sync::Arc;

pub use chess_api::ChessApiOpponent;
pub use disabled::DisabledOpponent;
pub use trait_def::{validate_suggestion, OpponentAgent, OpponentError};

use crate::config::OpponentConfig;
use crate::error::AppError;

/// Build the configured opponent. A missing URL disables it.
pub fn create_opponent(config: &OpponentConfig) -> Result<Arc<dyn OpponentAgent>, AppError> {
    match &config.url {
        Some(url) => {
            let agent = ChessApiOpponent::new(config, url.clone())
                .map_err(|e| AppError::config(format!("opponent client: {e}")))?;
            Ok(Arc::new(agent))
        }
        None => Ok(Arc::new(DisabledOpponent)),
    }
}
