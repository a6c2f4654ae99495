pub mod game_flow;
pub mod scheduler;

pub use game_flow::{GameFlowService, TickOutcome};
pub use scheduler::RoundScheduler;
