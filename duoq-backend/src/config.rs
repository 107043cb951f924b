//! Backend configuration

use crate::error::{BackendError, Result};
use duoq_compiler::{anyons_for, MAX_LOWERING_WIDTH};
use duoq_state::MAX_QUBITS;
use serde::{Deserialize, Serialize};

/// Configuration for [`GateBasedBackend`](crate::GateBasedBackend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateBasedConfig {
    /// Largest register the backend accepts
    ///
    /// A dense state holds `2^n` amplitudes, so this bounds memory.
    ///
    /// Default: 24
    pub max_qubits: usize,

    /// Seed for the generator behind
    /// [`apply_operation`](crate::QuantumBackend::apply_operation)
    ///
    /// Default: 0
    pub seed: u64,
}

impl Default for GateBasedConfig {
    fn default() -> Self {
        Self {
            max_qubits: 24,
            seed: 0,
        }
    }
}

impl GateBasedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small registers only, for tests and examples
    pub fn small() -> Self {
        Self {
            max_qubits: 12,
            ..Default::default()
        }
    }

    /// The largest register a state vector can address
    pub fn large() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
            ..Default::default()
        }
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(BackendError::InvalidConfiguration(format!(
                "max_qubits must be in [1, {}], got {}",
                MAX_QUBITS, self.max_qubits
            )));
        }
        Ok(())
    }
}

/// Configuration for [`TopologicalBackend`](crate::TopologicalBackend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologicalConfig {
    /// Number of σ anyons available
    ///
    /// `2n + 2` anyons encode `n` qubits. Must be even and at most the
    /// count braid lowering can address.
    ///
    /// Default: 6 (two qubits)
    pub anyon_capacity: usize,

    /// Seed for the generator behind
    /// [`apply_operation`](crate::QuantumBackend::apply_operation)
    ///
    /// Default: 0
    pub seed: u64,
}

impl Default for TopologicalConfig {
    fn default() -> Self {
        Self {
            anyon_capacity: anyons_for(MAX_LOWERING_WIDTH),
            seed: 0,
        }
    }
}

impl TopologicalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Four anyons: one logical qubit
    pub fn single_qubit() -> Self {
        Self {
            anyon_capacity: anyons_for(1),
            ..Default::default()
        }
    }

    pub fn with_anyon_capacity(mut self, anyon_capacity: usize) -> Self {
        self.anyon_capacity = anyon_capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Logical qubits the anyon capacity encodes
    pub fn max_qubits(&self) -> usize {
        (self.anyon_capacity / 2).saturating_sub(1)
    }

    pub fn validate(&self) -> Result<()> {
        let min = anyons_for(1);
        let max = anyons_for(MAX_LOWERING_WIDTH);
        if self.anyon_capacity % 2 != 0 {
            return Err(BackendError::InvalidConfiguration(format!(
                "anyon_capacity must be even, got {}",
                self.anyon_capacity
            )));
        }
        if self.anyon_capacity < min || self.anyon_capacity > max {
            return Err(BackendError::InvalidConfiguration(format!(
                "anyon_capacity must be in [{}, {}], got {}",
                min, max, self.anyon_capacity
            )));
        }
        Ok(())
    }
}
