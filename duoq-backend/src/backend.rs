//! Core backend trait

use crate::{BackendError, Result};
use duoq_core::{Circuit, QuantumError, QuantumOperation, StateKind};
use duoq_state::QuantumState;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Trait for quantum execution backends
///
/// A backend owns one native state representation. Every entry point is a
/// pure transform: states go in by reference and new states come out.
///
/// # Example
///
/// ```
/// use duoq_backend::{GateBasedBackend, QuantumBackend};
/// use duoq_core::Circuit;
///
/// let backend = GateBasedBackend::new();
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(0).unwrap().cnot(0, 1).unwrap();
///
/// let state = backend.execute_to_state(&circuit).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// ```
pub trait QuantumBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Representation this backend produces and consumes
    fn native_state_kind(&self) -> StateKind;

    /// Largest register the backend accepts
    fn max_qubits(&self) -> usize;

    /// Seed for the generator behind [`apply_operation`](Self::apply_operation)
    fn seed(&self) -> u64;

    /// |0...0⟩ on `num_qubits` qubits in the native representation
    fn initialize_state(&self, num_qubits: usize) -> Result<QuantumState>;

    /// Run every gate of `circuit` in order, starting from |0...0⟩
    fn execute_to_state(&self, circuit: &Circuit) -> Result<QuantumState>;

    /// Apply one operation, drawing measurement randomness from `rng`
    ///
    /// # Errors
    /// - [`BackendError::RepresentationMismatch`] if `state` is not native
    /// - [`BackendError::UnsupportedOperation`] if
    ///   [`supports_operation`](Self::supports_operation) is false for `op`
    /// - a validation error for out-of-range qubits or braid indices
    fn apply_operation_with_rng(
        &self,
        op: &QuantumOperation,
        state: &QuantumState,
        rng: &mut dyn RngCore,
    ) -> Result<QuantumState>;

    /// Apply one operation with a generator seeded from [`seed`](Self::seed)
    ///
    /// The result depends only on the backend configuration and the inputs.
    fn apply_operation(&self, op: &QuantumOperation, state: &QuantumState) -> Result<QuantumState> {
        let mut rng = StdRng::seed_from_u64(self.seed());
        self.apply_operation_with_rng(op, state, &mut rng)
    }

    /// Whether the shape of `op` is something this backend can apply
    ///
    /// Qubit indices are not looked at.
    fn supports_operation(&self, op: &QuantumOperation) -> bool;

    /// Validate circuit compatibility with backend
    fn validate_circuit(&self, circuit: &Circuit) -> Result<()> {
        if circuit.num_qubits() > self.max_qubits() {
            return Err(QuantumError::TooManyQubits {
                requested: circuit.num_qubits(),
                max: self.max_qubits(),
            }
            .into());
        }
        circuit.validate()?;
        Ok(())
    }

    /// Get backend description
    fn description(&self) -> String {
        format!(
            "{} ({}) - {} qubits",
            self.name(),
            self.native_state_kind(),
            self.max_qubits()
        )
    }
}

/// Register size check shared by `initialize_state` implementations
pub(crate) fn check_register<B: QuantumBackend + ?Sized>(backend: &B, num_qubits: usize) -> Result<()> {
    if num_qubits == 0 {
        return Err(QuantumError::EmptyRegister.into());
    }
    if num_qubits > backend.max_qubits() {
        return Err(QuantumError::TooManyQubits {
            requested: num_qubits,
            max: backend.max_qubits(),
        }
        .into());
    }
    Ok(())
}

pub(crate) fn representation_mismatch<B: QuantumBackend + ?Sized>(
    backend: &B,
    state: &QuantumState,
) -> BackendError {
    BackendError::RepresentationMismatch {
        backend: backend.name().to_string(),
        expected: backend.native_state_kind(),
        actual: state.kind(),
    }
}

pub(crate) fn unsupported<B: QuantumBackend + ?Sized>(backend: &B, op: &QuantumOperation) -> BackendError {
    BackendError::UnsupportedOperation {
        backend: backend.name().to_string(),
        operation: op.to_string(),
    }
}
