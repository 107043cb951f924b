//! Error types for backend operations

use duoq_compiler::LoweringError;
use duoq_core::{QuantumError, StateKind};
use duoq_state::StateError;
use thiserror::Error;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur during backend operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Malformed circuit, operation or register size
    #[error(transparent)]
    Validation(#[from] QuantumError),

    #[error(transparent)]
    State(#[from] StateError),

    /// Gate could not be compiled to braids
    #[error(transparent)]
    Lowering(#[from] LoweringError),

    /// Operation this backend has no implementation for
    #[error("{backend} does not support {operation}")]
    UnsupportedOperation { backend: String, operation: String },

    /// State handed to a backend in a foreign representation
    #[error("{backend} expects a {expected} state, got {actual}")]
    RepresentationMismatch {
        backend: String,
        expected: StateKind,
        actual: StateKind,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Coarse failure classes callers decide on
///
/// Validation failures are never worth retrying. Operation failures may
/// succeed on another backend, or after converting the state. Conversion
/// failures mean no representation change can help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Operation,
    ConversionUnsupported,
}

impl BackendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Validation(_) | BackendError::InvalidConfiguration(_) => {
                ErrorKind::Validation
            }
            BackendError::State(err) => match err {
                StateError::Validation(_)
                | StateError::DimensionMismatch { .. }
                | StateError::NotNormalized { .. }
                | StateError::InvalidFusionTree { .. } => ErrorKind::Validation,
                StateError::ImpossibleOutcome { .. } => ErrorKind::Operation,
                StateError::ConversionUnsupported { .. } => ErrorKind::ConversionUnsupported,
            },
            BackendError::Lowering(err) => match err {
                LoweringError::Validation(_) => ErrorKind::Validation,
                LoweringError::NoLowering { .. } | LoweringError::RegisterTooWide { .. } => {
                    ErrorKind::Operation
                }
            },
            BackendError::UnsupportedOperation { .. } | BackendError::RepresentationMismatch { .. } => {
                ErrorKind::Operation
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err: BackendError = QuantumError::EmptyRegister.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.is_validation());

        let err: BackendError = StateError::from(QuantumError::InvalidOutcome(2)).into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: BackendError = LoweringError::NoLowering {
            gate: "T(q0)".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Operation);

        let err: BackendError = StateError::ConversionUnsupported {
            from: StateKind::FusionSuperposition,
            to: StateKind::StateVector,
            reason: "leaked".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::ConversionUnsupported);

        let err = BackendError::RepresentationMismatch {
            backend: "gate-based".to_string(),
            expected: StateKind::StateVector,
            actual: StateKind::FusionSuperposition,
        };
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert!(err.to_string().contains("fusion-superposition"));
    }
}
