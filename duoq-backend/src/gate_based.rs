//! Gate-based backend
//!
//! Runs circuits on a dense [`StateVector`], delegating gate application
//! and measurement to `duoq-state`.
//!
//! # Example
//!
//! ```
//! use duoq_backend::{GateBasedBackend, GateBasedConfig, QuantumBackend};
//! use duoq_core::{GateSpec, QuantumOperation};
//!
//! let backend = GateBasedBackend::with_config(GateBasedConfig::new().with_seed(7)).unwrap();
//! let zero = backend.initialize_state(1).unwrap();
//! let flipped = backend
//!     .apply_operation(&QuantumOperation::Gate(GateSpec::X(0)), &zero)
//!     .unwrap();
//! assert_eq!(flipped.as_state_vector().unwrap().probabilities(), vec![0.0, 1.0]);
//! ```

use crate::backend::{check_register, representation_mismatch, unsupported};
use crate::config::GateBasedConfig;
use crate::{QuantumBackend, Result};
use duoq_core::{Circuit, Extension, QuantumOperation, StateKind};
use duoq_state::measurement::measure_qubit;
use duoq_state::{QuantumState, StateVector};
use rand::RngCore;
use tracing::debug;

/// State-vector backend
#[derive(Debug, Clone)]
pub struct GateBasedBackend {
    name: String,
    config: GateBasedConfig,
}

impl GateBasedBackend {
    /// Create a new gate-based backend with default configuration
    pub fn new() -> Self {
        Self {
            name: "GateBased".to_string(),
            config: GateBasedConfig::default(),
        }
    }

    /// Create a backend with custom configuration
    pub fn with_config(config: GateBasedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Set the backend name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &GateBasedConfig {
        &self.config
    }

    fn apply_leaf(&self, op: &QuantumOperation, state: StateVector, rng: &mut dyn RngCore) -> Result<StateVector> {
        match op {
            QuantumOperation::Gate(gate) => Ok(state.with_gate(gate)?),
            QuantumOperation::Measure(qubit) => {
                let (_, collapsed) = measure_qubit(rng, *qubit, &state)?;
                Ok(collapsed)
            }
            QuantumOperation::Extension(Extension::GlobalPhase(phi)) => Ok(state.with_global_phase(*phi)),
            _ => Err(unsupported(self, op)),
        }
    }
}

impl Default for GateBasedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumBackend for GateBasedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_state_kind(&self) -> StateKind {
        StateKind::StateVector
    }

    fn max_qubits(&self) -> usize {
        self.config.max_qubits
    }

    fn seed(&self) -> u64 {
        self.config.seed
    }

    fn initialize_state(&self, num_qubits: usize) -> Result<QuantumState> {
        check_register(self, num_qubits)?;
        Ok(StateVector::new(num_qubits)?.into())
    }

    fn execute_to_state(&self, circuit: &Circuit) -> Result<QuantumState> {
        self.validate_circuit(circuit)?;
        debug!(
            backend = %self.name,
            num_qubits = circuit.num_qubits(),
            gates = circuit.len(),
            "executing circuit"
        );

        let state = circuit
            .gates()
            .iter()
            .try_fold(StateVector::new(circuit.num_qubits())?, |state, gate| state.with_gate(gate))?;
        Ok(state.into())
    }

    fn apply_operation_with_rng(
        &self,
        op: &QuantumOperation,
        state: &QuantumState,
        rng: &mut dyn RngCore,
    ) -> Result<QuantumState> {
        let dense = state
            .as_state_vector()
            .ok_or_else(|| representation_mismatch(self, state))?;
        if let Some(leaf) = op.flatten().into_iter().find(|leaf| !self.supports_operation(leaf)) {
            return Err(unsupported(self, leaf));
        }
        op.validate(dense.num_qubits())?;

        let mut current = dense.clone();
        for leaf in op.flatten() {
            current = self.apply_leaf(leaf, current, rng)?;
        }
        Ok(current.into())
    }

    fn supports_operation(&self, op: &QuantumOperation) -> bool {
        match op {
            QuantumOperation::Gate(_) | QuantumOperation::Measure(_) => true,
            QuantumOperation::Braid(_) => false,
            QuantumOperation::Sequence(ops) => ops.iter().all(|op| self.supports_operation(op)),
            QuantumOperation::Extension(ext) => ext.native_kind() == StateKind::StateVector,
        }
    }
}
