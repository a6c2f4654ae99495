//! Outcomes of a vote submission.

use serde::Serialize;

use crate::errors::ErrorCode;

/// Why a vote was not recorded. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteRejection {
    /// Malformed UCI or a move that is not legal in the current position.
    IllegalMove,
    /// The identity already has a vote in this round.
    DuplicateVote,
    /// The referenced round is not the open one; the caller should refresh.
    RoundMismatch { current_round: u64 },
}

impl VoteRejection {
    pub fn code(&self) -> ErrorCode {
        match self {
            VoteRejection::IllegalMove => ErrorCode::IllegalMove,
            VoteRejection::DuplicateVote => ErrorCode::DuplicateVote,
            VoteRejection::RoundMismatch { .. } => ErrorCode::RoundMismatch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Accepted {
        round: u64,
        uci: String,
        /// Votes for `uci` in this round, including this one.
        move_votes: u32,
    },
    Rejected(VoteRejection),
}

impl VoteOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VoteOutcome::Accepted { .. })
    }
}

/// Wire shape of `POST /vote` responses.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round: Option<u64>,
}

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        match outcome {
            VoteOutcome::Accepted {
                round, move_votes, ..
            } => VoteResponse {
                accepted: true,
                reason: None,
                round: Some(round),
                votes: Some(move_votes),
                current_round: None,
            },
            VoteOutcome::Rejected(rejection) => {
                let current_round = match rejection {
                    VoteRejection::RoundMismatch { current_round } => Some(current_round),
                    _ => None,
                };
                VoteResponse {
                    accepted: false,
                    reason: Some(rejection.code().as_str()),
                    round: None,
                    votes: None,
                    current_round,
                }
            }
        }
    }
}
