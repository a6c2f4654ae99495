//! Domain layer: chess position, round bookkeeping and vote resolution.

pub mod position;
pub mod resolver;
pub mod round;
pub mod view;
pub mod vote;

#[cfg(test)]
mod tests_props_resolver;

pub use position::{LegalMove, Position, DEFAULT_OPENING};
pub use resolver::{resolve, Resolution};
pub use round::{RoundPhase, RoundState};
pub use view::GameView;
pub use vote::{VoteOutcome, VoteRejection, VoteResponse};
