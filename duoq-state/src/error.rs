//! Error types for state operations

use duoq_core::{QuantumError, StateKind};
use thiserror::Error;

/// Errors that can occur during state operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Malformed input (qubit index, outcome, shot count, ...)
    #[error(transparent)]
    Validation(#[from] QuantumError),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// State not normalized
    #[error("State not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },

    /// Fusion tree that does not describe a chain of σ anyons
    #[error("Invalid fusion tree: {reason}")]
    InvalidFusionTree { reason: String },

    /// Collapse onto an outcome the state cannot produce
    #[error("Outcome {outcome} on qubit {qubit} has zero probability")]
    ImpossibleOutcome { qubit: usize, outcome: u8 },

    /// No conversion path between two representations for this state
    #[error("Cannot convert {from} state to {to}: {reason}")]
    ConversionUnsupported {
        from: StateKind,
        to: StateKind,
        reason: String,
    },
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_transparent() {
        let err: StateError = QuantumError::InvalidOutcome(2).into();
        assert_eq!(err.to_string(), QuantumError::InvalidOutcome(2).to_string());
    }

    #[test]
    fn test_conversion_message() {
        let err = StateError::ConversionUnsupported {
            from: StateKind::FusionSuperposition,
            to: StateKind::StateVector,
            reason: "total charge is ψ".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fusion-superposition"));
        assert!(msg.contains("state-vector"));
    }
}
