//! Representation-tagged quantum state

use crate::fusion::FusionSuperposition;
use crate::state_vector::StateVector;
use duoq_core::StateKind;

/// A quantum state in one of the supported representations
///
/// Backends produce and consume these values; a state is only ever
/// replaced by a new value, never changed in place.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantumState {
    StateVector(StateVector),
    FusionSuperposition(FusionSuperposition),
}

impl QuantumState {
    pub fn kind(&self) -> StateKind {
        match self {
            QuantumState::StateVector(_) => StateKind::StateVector,
            QuantumState::FusionSuperposition(_) => StateKind::FusionSuperposition,
        }
    }

    /// Logical qubit count
    pub fn num_qubits(&self) -> usize {
        match self {
            QuantumState::StateVector(s) => s.num_qubits(),
            QuantumState::FusionSuperposition(s) => s.logical_qubits(),
        }
    }

    pub fn norm(&self) -> f64 {
        match self {
            QuantumState::StateVector(s) => s.norm(),
            QuantumState::FusionSuperposition(s) => s.norm(),
        }
    }

    pub fn as_state_vector(&self) -> Option<&StateVector> {
        match self {
            QuantumState::StateVector(s) => Some(s),
            QuantumState::FusionSuperposition(_) => None,
        }
    }

    pub fn as_fusion_superposition(&self) -> Option<&FusionSuperposition> {
        match self {
            QuantumState::FusionSuperposition(s) => Some(s),
            QuantumState::StateVector(_) => None,
        }
    }
}

impl From<StateVector> for QuantumState {
    fn from(state: StateVector) -> Self {
        QuantumState::StateVector(state)
    }
}

impl From<FusionSuperposition> for QuantumState {
    fn from(state: FusionSuperposition) -> Self {
        QuantumState::FusionSuperposition(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kinds_and_accessors() {
        let dense: QuantumState = StateVector::new(2).unwrap().into();
        assert_eq!(dense.kind(), StateKind::StateVector);
        assert_eq!(dense.num_qubits(), 2);
        assert!(dense.as_state_vector().is_some());
        assert!(dense.as_fusion_superposition().is_none());

        let topo: QuantumState = FusionSuperposition::vacuum(2).unwrap().into();
        assert_eq!(topo.kind(), StateKind::FusionSuperposition);
        assert_eq!(topo.num_qubits(), 2);
        assert_relative_eq!(topo.norm(), 1.0);
    }
}
