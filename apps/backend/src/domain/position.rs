//! Board position backed by the `shakmaty` rules engine.
//!
//! `Position` is the only place the rest of the crate touches chess rules:
//! legal move generation, UCI parsing, SAN rendering, FEN round-tripping and
//! game-over detection.

use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position as _};

use crate::errors::domain::DomainError;

/// Opening line the shared game starts from.
pub const DEFAULT_OPENING: [&str; 10] = [
    "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "b1c3", "f8e7",
];

/// One legal move as offered to voters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    pub uci: String,
    pub san: String,
}

#[derive(Debug, Clone)]
pub struct Position {
    board: Chess,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    pub fn starting() -> Self {
        Self {
            board: Chess::default(),
        }
    }

    /// Replay `moves` from the starting position. Moves that are not legal at
    /// their turn are skipped.
    pub fn with_opening(moves: &[&str]) -> Self {
        moves
            .iter()
            .fold(Self::starting(), |pos, uci| match pos.apply(uci) {
                Ok(next) => next,
                Err(_) => pos,
            })
    }

    /// Decode a stored FEN token. Anything that does not describe a legal
    /// standard-chess position is treated as corrupted state.
    pub fn from_fen(fen: &str) -> Result<Self, DomainError> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| DomainError::data_corruption(format!("unparseable FEN '{fen}': {e}")))?;
        let board: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| DomainError::data_corruption(format!("illegal FEN '{fen}': {e}")))?;
        Ok(Self { board })
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.board.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn side_to_move(&self) -> &'static str {
        match self.board.turn() {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_game_over()
    }

    /// Legal moves in generation order, each with UCI and SAN notation.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.board
            .legal_moves()
            .iter()
            .map(|m| LegalMove {
                uci: Self::uci_of(m),
                san: SanPlus::from_move(self.board.clone(), m).to_string(),
            })
            .collect()
    }

    /// UCI strings of all legal moves.
    pub fn legal_move_ids(&self) -> Vec<String> {
        self.board.legal_moves().iter().map(Self::uci_of).collect()
    }

    pub fn is_legal(&self, uci: &str) -> bool {
        self.parse_move(uci).is_ok()
    }

    /// Normalized UCI for a legal move (`None` when not legal), so that
    /// equivalent spellings share one tally entry.
    pub fn canonical_uci(&self, uci: &str) -> Option<String> {
        self.parse_move(uci).ok().map(|m| Self::uci_of(&m))
    }

    /// SAN for a legal move, `None` when `uci` is not legal here.
    pub fn notation(&self, uci: &str) -> Option<String> {
        self.parse_move(uci)
            .ok()
            .map(|m| SanPlus::from_move(self.board.clone(), &m).to_string())
    }

    /// Play `uci` on a copy of this position.
    pub fn apply(&self, uci: &str) -> Result<Position, DomainError> {
        let m = self.parse_move(uci)?;
        let board = self
            .board
            .clone()
            .play(&m)
            .map_err(|e| DomainError::illegal_move(format!("{uci}: {e}")))?;
        Ok(Self { board })
    }

    fn parse_move(&self, uci: &str) -> Result<Move, DomainError> {
        let parsed: UciMove = uci
            .trim()
            .parse()
            .map_err(|_| DomainError::illegal_move(format!("malformed move '{uci}'")))?;
        parsed
            .to_move(&self.board)
            .map_err(|_| DomainError::illegal_move(format!("'{uci}' is not legal here")))
    }

    fn uci_of(m: &Move) -> String {
        m.to_uci(CastlingMode::Standard).to_string()
    }
}
