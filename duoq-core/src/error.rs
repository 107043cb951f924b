//! Error types for duoq
//!
//! Every variant here describes malformed input the caller could have
//! checked before calling into the simulator. Backends surface these as
//! validation failures; they are never worth retrying.

use thiserror::Error;

/// Errors raised while validating circuits, gates and measurement requests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Register has no qubits
    #[error("Register must have at least one qubit")]
    EmptyRegister,

    /// Qubit index outside the register
    #[error("Invalid qubit index {qubit}: register has only {num_qubits} qubits")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    /// Same qubit used twice in a multi-qubit gate
    #[error("Duplicate qubit q{0} in gate operation")]
    DuplicateQubit(usize),

    /// Gate applied to wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Rotation angle is NaN or infinite
    #[error("Gate '{gate}' has non-finite angle {value}")]
    NonFiniteAngle { gate: String, value: f64 },

    /// Measurement outcome other than 0 or 1
    #[error("Invalid measurement outcome {0}: expected 0 or 1")]
    InvalidOutcome(u8),

    /// Sample or shot count below one
    #[error("Invalid shot count {0}: at least one shot is required")]
    InvalidShotCount(usize),

    /// Basis index outside `[0, 2^n)`
    #[error("Basis index {index} out of range for dimension {dimension}")]
    BasisIndexOutOfRange { index: usize, dimension: usize },

    /// Register wider than the configured maximum
    #[error("Register of {requested} qubits exceeds the maximum of {max}")]
    TooManyQubits { requested: usize, max: usize },

    /// Braid generator index outside the anyon chain
    #[error("Invalid braid generator {index}: chain has {num_anyons} anyons")]
    InvalidBraid { index: usize, num_anyons: usize },
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit { qubit, num_qubits }
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create a non-finite angle error
    pub fn non_finite_angle(gate: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteAngle {
            gate: gate.into(),
            value,
        }
    }
}
