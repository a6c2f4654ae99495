//! Error codes for the crowd-chess backend API.
//!
//! Every machine-readable code that leaves the process is defined here.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in Problem Details bodies and in vote rejection `reason` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Vote rejections
    /// Move is malformed or not legal in the current position
    IllegalMove,
    /// Visitor already voted in this round
    DuplicateVote,
    /// Caller referenced a round that is no longer open
    RoundMismatch,

    // Request validation
    /// General bad request error
    BadRequest,
    /// General validation error
    ValidationError,

    // System errors
    /// Persistence substrate unreachable or failing
    StoreUnavailable,
    /// Stored state could not be decoded
    DataCorruption,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::RoundMismatch => "ROUND_MISMATCH",

            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
