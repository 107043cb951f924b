//! Topological backend
//!
//! Holds states as superpositions over Ising fusion trees and acts on them
//! only by braiding. Gates are lowered to braid words by `duoq-compiler`
//! first; a gate without a lowering is an operation error, never an
//! approximation.
//!
//! # Example
//!
//! ```
//! use duoq_backend::{QuantumBackend, TopologicalBackend};
//! use duoq_core::Circuit;
//!
//! let backend = TopologicalBackend::new();
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.h(0).unwrap().cnot(0, 1).unwrap();
//!
//! let state = backend.execute_to_state(&circuit).unwrap();
//! let fusion = state.as_fusion_superposition().unwrap();
//! assert_eq!(fusion.num_anyons(), 6);
//! assert_eq!(fusion.len(), 2);
//! ```

use crate::backend::{check_register, representation_mismatch, unsupported};
use crate::config::TopologicalConfig;
use crate::{QuantumBackend, Result};
use duoq_compiler::{has_lowering, lower, lower_circuit};
use duoq_core::{Circuit, Extension, QuantumError, QuantumOperation, StateKind};
use duoq_state::{FusionSuperposition, QuantumState};
use rand::RngCore;
use tracing::debug;

/// Ising anyon backend with a fixed anyon capacity
#[derive(Debug, Clone)]
pub struct TopologicalBackend {
    name: String,
    config: TopologicalConfig,
}

impl TopologicalBackend {
    /// Create a new topological backend with default configuration
    pub fn new() -> Self {
        Self {
            name: "Topological".to_string(),
            config: TopologicalConfig::default(),
        }
    }

    /// Create a backend with custom configuration
    pub fn with_config(config: TopologicalConfig) -> Result<Self> {
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

    pub fn config(&self) -> &TopologicalConfig {
        &self.config
    }

    pub fn anyon_capacity(&self) -> usize {
        self.config.anyon_capacity
    }

    fn apply_leaf(
        &self,
        op: &QuantumOperation,
        state: FusionSuperposition,
        rng: &mut dyn RngCore,
    ) -> Result<FusionSuperposition> {
        match op {
            QuantumOperation::Braid(index) => Ok(state.apply_braid(*index)?),
            QuantumOperation::Extension(Extension::InverseBraid(index)) => {
                Ok(state.apply_inverse_braid(*index)?)
            }
            QuantumOperation::Gate(gate) => {
                let word = lower(gate, state.logical_qubits())?;
                Ok(state.apply_braids(&word)?)
            }
            QuantumOperation::Measure(qubit) => {
                let (_, collapsed) = state.measure_pair(rng, *qubit)?;
                Ok(collapsed)
            }
            _ => Err(unsupported(self, op)),
        }
    }
}

impl Default for TopologicalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumBackend for TopologicalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_state_kind(&self) -> StateKind {
        StateKind::FusionSuperposition
    }

    fn max_qubits(&self) -> usize {
        self.config.max_qubits()
    }

    fn seed(&self) -> u64 {
        self.config.seed
    }

    fn initialize_state(&self, num_qubits: usize) -> Result<QuantumState> {
        check_register(self, num_qubits)?;
        Ok(FusionSuperposition::vacuum(num_qubits)?.into())
    }

    fn execute_to_state(&self, circuit: &Circuit) -> Result<QuantumState> {
        self.validate_circuit(circuit)?;
        let program = lower_circuit(circuit, self.max_qubits())?;
        debug!(
            backend = %self.name,
            num_qubits = circuit.num_qubits(),
            gates = circuit.len(),
            braids = program.len(),
            "executing circuit"
        );

        let state = FusionSuperposition::vacuum(program.width)?.apply_braids(&program.braids)?;
        Ok(state.into())
    }

    fn apply_operation_with_rng(
        &self,
        op: &QuantumOperation,
        state: &QuantumState,
        rng: &mut dyn RngCore,
    ) -> Result<QuantumState> {
        let fusion = state
            .as_fusion_superposition()
            .ok_or_else(|| representation_mismatch(self, state))?;
        if let Some(leaf) = op.flatten().into_iter().find(|leaf| !self.supports_operation(leaf)) {
            return Err(unsupported(self, leaf));
        }
        if fusion.num_anyons() > self.config.anyon_capacity {
            return Err(QuantumError::TooManyQubits {
                requested: fusion.logical_qubits(),
                max: self.max_qubits(),
            }
            .into());
        }
        op.validate(fusion.logical_qubits())?;

        let mut current = fusion.clone();
        for leaf in op.flatten() {
            current = self.apply_leaf(leaf, current, rng)?;
        }
        Ok(current.into())
    }

    fn supports_operation(&self, op: &QuantumOperation) -> bool {
        match op {
            QuantumOperation::Braid(_) | QuantumOperation::Measure(_) => true,
            QuantumOperation::Gate(gate) => has_lowering(gate),
            QuantumOperation::Sequence(ops) => ops.iter().all(|op| self.supports_operation(op)),
            QuantumOperation::Extension(ext) => ext.native_kind() == StateKind::FusionSuperposition,
        }
    }
}
