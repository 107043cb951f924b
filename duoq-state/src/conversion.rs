//! Conversion between state representations
//!
//! Each ordered pair of [`StateKind`]s declares its own capability through
//! [`conversion_capability`]; nothing is assumed transitively. A state that
//! a declared path still cannot carry (a fusion superposition that leaked
//! out of the qubit encoding) fails with
//! [`StateError::ConversionUnsupported`] instead of coming back unchanged.
//!
//! The dense and fusion representations are related by the basis bijection
//! described in [`fusion`](crate::fusion), so conversion moves coefficients
//! between bases without recomputing them and round trips are exact.

use crate::error::{Result, StateError};
use crate::fusion::{FusionSuperposition, FusionTree};
use crate::quantum_state::QuantumState;
use crate::state_vector::StateVector;
use duoq_core::amplitude::ZERO;
use duoq_core::StateKind;
use std::collections::BTreeMap;
use tracing::debug;

/// What a conversion path guarantees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionCapability {
    /// Source and target are the same representation
    Identity,
    /// Every amplitude is carried over exactly
    Exact,
}

/// Capability declared for converting `from` into `to`
pub fn conversion_capability(from: StateKind, to: StateKind) -> ConversionCapability {
    match (from, to) {
        (StateKind::StateVector, StateKind::StateVector)
        | (StateKind::FusionSuperposition, StateKind::FusionSuperposition) => {
            ConversionCapability::Identity
        }
        (StateKind::StateVector, StateKind::FusionSuperposition)
        | (StateKind::FusionSuperposition, StateKind::StateVector) => ConversionCapability::Exact,
    }
}

/// Convert `state` into the `target` representation
///
/// # Example
/// ```
/// use duoq_core::{GateSpec, StateKind};
/// use duoq_state::{convert, QuantumState, StateVector};
///
/// let plus: QuantumState = StateVector::new(2).unwrap().apply_gate(&GateSpec::H(0)).unwrap().into();
/// let topo = convert(StateKind::FusionSuperposition, &plus).unwrap();
/// let back = convert(StateKind::StateVector, &topo).unwrap();
/// assert_eq!(back, plus);
/// ```
pub fn convert(target: StateKind, state: &QuantumState) -> Result<QuantumState> {
    match (state, target) {
        (QuantumState::StateVector(_), StateKind::StateVector)
        | (QuantumState::FusionSuperposition(_), StateKind::FusionSuperposition) => Ok(state.clone()),
        (QuantumState::StateVector(s), StateKind::FusionSuperposition) => {
            Ok(to_fusion_superposition(s).into())
        }
        (QuantumState::FusionSuperposition(s), StateKind::StateVector) => {
            Ok(to_state_vector(s)?.into())
        }
    }
}

/// Encode a dense state in `2n + 2` anyons
pub fn to_fusion_superposition(state: &StateVector) -> FusionSuperposition {
    let n = state.num_qubits();
    let terms: BTreeMap<FusionTree, _> = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(_, a)| **a != ZERO)
        .map(|(i, &a)| (FusionTree::from_basis_index(i, n), a))
        .collect();
    debug!(
        from = %StateKind::StateVector,
        to = %StateKind::FusionSuperposition,
        num_qubits = n,
        terms = terms.len(),
        "converting state"
    );
    FusionSuperposition::from_parts(2 * n + 2, n, terms)
}

/// Decode a fusion superposition that lies inside the qubit encoding
///
/// # Errors
/// [`StateError::ConversionUnsupported`] if the chain length does not match
/// the logical register or some tree has non-vacuum total charge.
pub fn to_state_vector(state: &FusionSuperposition) -> Result<StateVector> {
    if !state.is_qubit_encoding() {
        let reason = if state.num_anyons() != 2 * state.logical_qubits() + 2 {
            format!(
                "{} anyons do not match the {}-qubit encoding",
                state.num_anyons(),
                state.logical_qubits()
            )
        } else {
            "superposition has weight outside vacuum total charge".to_string()
        };
        return Err(StateError::ConversionUnsupported {
            from: StateKind::FusionSuperposition,
            to: StateKind::StateVector,
            reason,
        });
    }

    let n = state.logical_qubits();
    debug!(
        from = %StateKind::FusionSuperposition,
        to = %StateKind::StateVector,
        num_qubits = n,
        terms = state.len(),
        "converting state"
    );
    let mut amplitudes = vec![ZERO; 1usize << n];
    for (tree, &c) in state.terms() {
        amplitudes[tree.basis_index(n)] = c;
    }
    Ok(StateVector::from_parts(n, amplitudes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anyon::Charge;
    use approx::assert_relative_eq;
    use duoq_core::amplitude::ONE;
    use duoq_core::GateSpec;

    #[test]
    fn test_capabilities_declared_per_pair() {
        use StateKind::*;
        assert_eq!(conversion_capability(StateVector, StateVector), ConversionCapability::Identity);
        assert_eq!(
            conversion_capability(FusionSuperposition, StateVector),
            ConversionCapability::Exact
        );
    }

    #[test]
    fn test_identity_conversion() {
        let state: QuantumState = StateVector::new(2).unwrap().into();
        assert_eq!(convert(StateKind::StateVector, &state).unwrap(), state);

        let topo: QuantumState = FusionSuperposition::vacuum(1).unwrap().into();
        assert_eq!(convert(StateKind::FusionSuperposition, &topo).unwrap(), topo);
    }

    #[test]
    fn test_zero_state_maps_to_vacuum() {
        let dense = StateVector::new(2).unwrap();
        assert_eq!(to_fusion_superposition(&dense), FusionSuperposition::vacuum(2).unwrap());
    }

    #[test]
    fn test_round_trip_plus_state() {
        let dense = StateVector::new(2).unwrap().apply_gate(&GateSpec::H(0)).unwrap();
        let topo = to_fusion_superposition(&dense);
        assert_eq!(topo.len(), 2);
        let back = to_state_vector(&topo).unwrap();
        for (a, b) in back.amplitudes().iter().zip(dense.amplitudes()) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_measurement_statistics_preserved() {
        let dense = StateVector::new(2)
            .unwrap()
            .apply_gates(&[GateSpec::Ry(0, 0.8), GateSpec::Cnot { control: 0, target: 1 }])
            .unwrap();
        let topo = to_fusion_superposition(&dense);
        let (p0, p1) = topo.pair_parity_probabilities(1).unwrap();
        assert_relative_eq!(p0, dense.probabilities()[0b00] + dense.probabilities()[0b01], epsilon = 1e-12);
        assert_relative_eq!(p1, dense.probabilities()[0b10] + dense.probabilities()[0b11], epsilon = 1e-12);
    }

    #[test]
    fn test_leaked_state_is_unsupported() {
        use Charge::*;
        let tree = crate::fusion::FusionTree::new(vec![Vacuum, Sigma, Psi, Sigma, Psi]).unwrap();
        let leaked = FusionSuperposition::from_terms(4, 1, vec![(tree, ONE)]).unwrap();
        let result = convert(StateKind::StateVector, &leaked.into());
        assert!(matches!(
            result,
            Err(StateError::ConversionUnsupported {
                from: StateKind::FusionSuperposition,
                to: StateKind::StateVector,
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_chain_is_unsupported() {
        let tree = crate::fusion::FusionTree::from_basis_index(0, 2);
        let wide = FusionSuperposition::from_terms(6, 1, vec![(tree, ONE)]).unwrap();
        let err = to_state_vector(&wide).unwrap_err();
        assert!(err.to_string().contains("anyons"));
    }
}
