//! Backend-agnostic operations
//!
//! [`QuantumOperation`] is what backends and the dispatch layer consume.
//! A [`Circuit`](crate::Circuit) is a list of gates; an operation stream can
//! also carry braids, mid-circuit measurements and backend-specific
//! extensions.

use crate::{GateSpec, QuantumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Representation a quantum state is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateKind {
    /// Dense vector of 2^n complex amplitudes
    StateVector,
    /// Superposition over anyon fusion trees
    FusionSuperposition,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKind::StateVector => write!(f, "state-vector"),
            StateKind::FusionSuperposition => write!(f, "fusion-superposition"),
        }
    }
}

/// Payloads only one backend family understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Extension {
    /// Multiply the whole state by e^{iφ}
    GlobalPhase(f64),
    /// Clockwise exchange of anyons `i` and `i + 1`
    InverseBraid(usize),
}

impl Extension {
    /// Representation the payload is defined on
    pub fn native_kind(&self) -> StateKind {
        match self {
            Extension::GlobalPhase(_) => StateKind::StateVector,
            Extension::InverseBraid(_) => StateKind::FusionSuperposition,
        }
    }
}

/// A single step a backend can be asked to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuantumOperation {
    Gate(GateSpec),
    /// Counter-clockwise exchange of anyons `i` and `i + 1`
    Braid(usize),
    /// Projective measurement of one qubit in the computational basis
    Measure(usize),
    Sequence(Vec<QuantumOperation>),
    Extension(Extension),
}

impl QuantumOperation {
    /// Structural validation against a register of `num_qubits`
    ///
    /// Braid indices are left to the backend, since their bound depends on
    /// the anyon chain rather than the qubit count.
    pub fn validate(&self, num_qubits: usize) -> Result<()> {
        match self {
            QuantumOperation::Gate(gate) => gate.validate(num_qubits),
            QuantumOperation::Measure(qubit) => {
                if *qubit >= num_qubits {
                    Err(QuantumError::invalid_qubit(*qubit, num_qubits))
                } else {
                    Ok(())
                }
            }
            QuantumOperation::Sequence(ops) => ops.iter().try_for_each(|op| op.validate(num_qubits)),
            QuantumOperation::Extension(Extension::GlobalPhase(phi)) => {
                if phi.is_finite() {
                    Ok(())
                } else {
                    Err(QuantumError::non_finite_angle("GLOBAL_PHASE", *phi))
                }
            }
            QuantumOperation::Braid(_) | QuantumOperation::Extension(Extension::InverseBraid(_)) => {
                Ok(())
            }
        }
    }

    /// Leaf operations of nested sequences, in execution order
    pub fn flatten(&self) -> Vec<&QuantumOperation> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a QuantumOperation>) {
        match self {
            QuantumOperation::Sequence(ops) => {
                for op in ops {
                    op.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}

impl From<GateSpec> for QuantumOperation {
    fn from(gate: GateSpec) -> Self {
        QuantumOperation::Gate(gate)
    }
}

impl From<Extension> for QuantumOperation {
    fn from(extension: Extension) -> Self {
        QuantumOperation::Extension(extension)
    }
}

impl fmt::Display for QuantumOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantumOperation::Gate(gate) => write!(f, "{}", gate),
            QuantumOperation::Braid(i) => write!(f, "BRAID(σ{})", i),
            QuantumOperation::Measure(q) => write!(f, "MEASURE(q{})", q),
            QuantumOperation::Sequence(ops) => write!(f, "SEQUENCE[{}]", ops.len()),
            QuantumOperation::Extension(Extension::GlobalPhase(phi)) => {
                write!(f, "GLOBAL_PHASE[{:.4}]", phi)
            }
            QuantumOperation::Extension(Extension::InverseBraid(i)) => write!(f, "BRAID(σ{}⁻¹)", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_native_kind() {
        assert_eq!(Extension::GlobalPhase(0.1).native_kind(), StateKind::StateVector);
        assert_eq!(
            Extension::InverseBraid(2).native_kind(),
            StateKind::FusionSuperposition
        );
    }

    #[test]
    fn test_validate_nested_sequence() {
        let op = QuantumOperation::Sequence(vec![
            GateSpec::H(0).into(),
            QuantumOperation::Sequence(vec![QuantumOperation::Measure(3)]),
        ]);
        assert_eq!(op.validate(2), Err(QuantumError::invalid_qubit(3, 2)));
        assert!(op.validate(4).is_ok());
    }

    #[test]
    fn test_validate_ignores_braid_bounds() {
        assert!(QuantumOperation::Braid(99).validate(1).is_ok());
    }

    #[test]
    fn test_validate_global_phase() {
        let op = QuantumOperation::Extension(Extension::GlobalPhase(f64::NAN));
        assert!(matches!(op.validate(1), Err(QuantumError::NonFiniteAngle { .. })));
    }

    #[test]
    fn test_flatten_preserves_order() {
        let op = QuantumOperation::Sequence(vec![
            QuantumOperation::Braid(0),
            QuantumOperation::Sequence(vec![
                QuantumOperation::Braid(1),
                QuantumOperation::Sequence(vec![]),
                QuantumOperation::Measure(0),
            ]),
            QuantumOperation::Braid(2),
        ]);
        let leaves = op.flatten();
        assert_eq!(
            leaves,
            vec![
                &QuantumOperation::Braid(0),
                &QuantumOperation::Braid(1),
                &QuantumOperation::Measure(0),
                &QuantumOperation::Braid(2),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(QuantumOperation::Measure(1).to_string(), "MEASURE(q1)");
        assert_eq!(QuantumOperation::Braid(2).to_string(), "BRAID(σ2)");
    }
}
