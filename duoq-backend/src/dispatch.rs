//! Representation-aware dispatch
//!
//! Callers holding a state in any representation hand it to any backend
//! through [`apply_with_conversion`]. The state is converted into the
//! backend's native representation only when it is not already there, so a
//! sequence of operations on one backend converts at most once.
//!
//! # Example
//!
//! ```
//! use duoq_backend::dispatch::{apply_sequence, measure_state};
//! use duoq_backend::{GateBasedBackend, QuantumBackend, TopologicalBackend};
//! use duoq_core::{GateSpec, QuantumOperation};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let dense = GateBasedBackend::new().initialize_state(2).unwrap();
//! let ops: Vec<QuantumOperation> = vec![
//!     GateSpec::H(0).into(),
//!     GateSpec::Cnot { control: 0, target: 1 }.into(),
//! ];
//! let bell = apply_sequence(&TopologicalBackend::new(), &ops, &dense).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let shots = measure_state(&bell, 100, &mut rng).unwrap();
//! assert!(shots.counts().keys().all(|bits| bits == "00" || bits == "11"));
//! ```

use crate::result::ShotResults;
use crate::{QuantumBackend, Result};
use duoq_core::{QuantumOperation, StateKind};
use duoq_state::measurement::{bits_of, sample_measurements};
use duoq_state::QuantumState;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

/// Converts states between representations for the dispatch layer
pub trait StateConverter {
    fn convert(&self, target: StateKind, state: &QuantumState) -> duoq_state::Result<QuantumState>;
}

/// Converter backed by [`duoq_state::convert`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactConverter;

impl StateConverter for ExactConverter {
    fn convert(&self, target: StateKind, state: &QuantumState) -> duoq_state::Result<QuantumState> {
        duoq_state::convert(target, state)
    }
}

/// Apply `op` on `backend`, converting `state` first if it is not native
pub fn apply_with_conversion<B>(backend: &B, op: &QuantumOperation, state: &QuantumState) -> Result<QuantumState>
where
    B: QuantumBackend + ?Sized,
{
    apply_with_conversion_using(&ExactConverter, backend, op, state)
}

/// [`apply_with_conversion`] with a caller-supplied converter
pub fn apply_with_conversion_using<C, B>(
    converter: &C,
    backend: &B,
    op: &QuantumOperation,
    state: &QuantumState,
) -> Result<QuantumState>
where
    C: StateConverter + ?Sized,
    B: QuantumBackend + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(backend.seed());
    dispatch(converter, backend, op, state, &mut rng)
}

/// Fold [`apply_with_conversion`] over `ops`, stopping at the first failure
///
/// Measurements in the sequence draw from one generator seeded from the
/// backend, so repeated measurements are independent of each other.
pub fn apply_sequence<B>(backend: &B, ops: &[QuantumOperation], initial: &QuantumState) -> Result<QuantumState>
where
    B: QuantumBackend + ?Sized,
{
    apply_sequence_using(&ExactConverter, backend, ops, initial)
}

/// [`apply_sequence`] with a caller-supplied converter
pub fn apply_sequence_using<C, B>(
    converter: &C,
    backend: &B,
    ops: &[QuantumOperation],
    initial: &QuantumState,
) -> Result<QuantumState>
where
    C: StateConverter + ?Sized,
    B: QuantumBackend + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(backend.seed());
    ops.iter().try_fold(initial.clone(), |state, op| {
        dispatch(converter, backend, op, &state, &mut rng)
    })
}

fn dispatch<C, B>(
    converter: &C,
    backend: &B,
    op: &QuantumOperation,
    state: &QuantumState,
    rng: &mut dyn RngCore,
) -> Result<QuantumState>
where
    C: StateConverter + ?Sized,
    B: QuantumBackend + ?Sized,
{
    let native = backend.native_state_kind();
    if state.kind() == native {
        return backend.apply_operation_with_rng(op, state, rng);
    }

    debug!(
        backend = backend.name(),
        from = %state.kind(),
        to = %native,
        num_qubits = state.num_qubits(),
        "converting state before dispatch"
    );
    let converted = converter.convert(native, state)?;
    backend.apply_operation_with_rng(op, &converted, rng)
}

/// Measure every qubit of `state` `shots` times, whatever its representation
///
/// # Errors
/// A validation error if `shots` is 0.
pub fn measure_state<R: Rng + ?Sized>(state: &QuantumState, shots: usize, rng: &mut R) -> Result<ShotResults> {
    let num_qubits = state.num_qubits();
    let outcomes: Vec<Vec<u8>> = match state {
        QuantumState::StateVector(dense) => sample_measurements(rng, shots, dense)?
            .into_iter()
            .map(|index| bits_of(index, num_qubits))
            .collect(),
        QuantumState::FusionSuperposition(fusion) => fusion.sample_shots(rng, shots)?,
    };
    Ok(ShotResults::new(num_qubits, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GateBasedBackend, TopologicalBackend};
    use duoq_core::GateSpec;

    #[test]
    fn test_native_state_passes_through() {
        let backend = GateBasedBackend::new();
        let state = backend.initialize_state(1).unwrap();
        let op: QuantumOperation = GateSpec::X(0).into();
        assert_eq!(
            apply_with_conversion(&backend, &op, &state).unwrap(),
            backend.apply_operation(&op, &state).unwrap()
        );
    }

    #[test]
    fn test_foreign_state_is_converted() {
        let topo = TopologicalBackend::new();
        let dense = GateBasedBackend::new().initialize_state(2).unwrap();
        let out = apply_with_conversion(&topo, &GateSpec::X(1).into(), &dense).unwrap();
        assert_eq!(out.kind(), StateKind::FusionSuperposition);

        let back = apply_with_conversion(&GateBasedBackend::new(), &GateSpec::X(1).into(), &out).unwrap();
        let probs = back.as_state_vector().unwrap().probabilities();
        assert!((probs[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_measure_state_rejects_zero_shots() {
        let state = GateBasedBackend::new().initialize_state(1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(measure_state(&state, 0, &mut rng).is_err());
    }

    #[test]
    fn test_empty_sequence_returns_input() {
        let state = GateBasedBackend::new().initialize_state(2).unwrap();
        let out = apply_sequence(&TopologicalBackend::new(), &[], &state).unwrap();
        assert_eq!(out, state);
    }

    #[test]
    fn test_dyn_backend() {
        let backends: Vec<Box<dyn QuantumBackend>> =
            vec![Box::new(GateBasedBackend::new()), Box::new(TopologicalBackend::new())];
        let state = backends[0].initialize_state(1).unwrap();
        for backend in &backends {
            let out = apply_with_conversion(backend.as_ref(), &GateSpec::H(0).into(), &state).unwrap();
            assert_eq!(out.kind(), backend.native_state_kind());
        }
    }
}
