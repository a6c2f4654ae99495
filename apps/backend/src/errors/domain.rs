//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and store-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failures raised by the rules layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// UCI text that does not name a legal move in the position
    IllegalMove,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    StoreUnavailable,
    DataCorruption,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or rules violation
    Validation(ValidationKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn illegal_move(detail: impl Into<String>) -> Self {
        Self::validation(ValidationKind::IllegalMove, detail)
    }

    pub fn store_unavailable(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::StoreUnavailable, detail)
    }

    pub fn data_corruption(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::DataCorruption, detail)
    }

    pub fn is_illegal_move(&self) -> bool {
        matches!(self, Self::Validation(ValidationKind::IllegalMove, _))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::store_unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "infra StoreUnavailable: connection refused"
        );
    }

    #[test]
    fn illegal_move_helper_matches_kind() {
        assert!(DomainError::illegal_move("e2e5").is_illegal_move());
        assert!(!DomainError::data_corruption("bad fen").is_illegal_move());
    }
}
