//! Read model served to the presentation layer.

use std::collections::BTreeMap;

use serde::Serialize;

use super::position::LegalMove;
use super::round::RoundPhase;

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub fen: String,
    pub round: u64,
    pub phase: RoundPhase,
    pub side_to_move: &'static str,
    pub legal_moves: Vec<LegalMove>,
    pub votes: BTreeMap<String, u32>,
    pub total_votes: u32,
    /// Whole seconds left in the voting window.
    pub time_left: u64,
    pub formatted_time_left: String,
    pub voting_duration: u64,
    pub game_over: bool,
}
