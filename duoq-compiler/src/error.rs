//! Error types for braid lowering

use duoq_core::QuantumError;
use thiserror::Error;

/// Errors raised while lowering gates to braid words
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoweringError {
    /// Gate outside the braid-reachable set
    #[error("No braid lowering for gate {gate}")]
    NoLowering { gate: String },

    /// Register wider than braiding can address
    #[error("Register of {width} qubits is too wide for braid lowering (max {max})")]
    RegisterTooWide { width: usize, max: usize },

    #[error(transparent)]
    Validation(#[from] QuantumError),
}

/// Result type for lowering
pub type Result<T> = std::result::Result<T, LoweringError>;
