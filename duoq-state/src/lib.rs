//! Quantum state representations for duoq
//!
//! Two representations of the same physics:
//!
//! - [`StateVector`]: 2^n complex amplitudes with gate kernels and the
//!   [`measurement`] engine
//! - [`FusionSuperposition`]: a superposition over Ising anyon
//!   [`FusionTree`]s, acted on by braids
//!
//! [`QuantumState`] tags a value with its representation and [`convert`]
//! moves a state between them.
//!
//! # Example
//!
//! ```
//! use duoq_core::{GateSpec, StateKind};
//! use duoq_state::{convert, measurement, QuantumState, StateVector};
//!
//! let bell = StateVector::new(2)
//!     .unwrap()
//!     .apply_gates(&[GateSpec::H(0), GateSpec::Cnot { control: 0, target: 1 }])
//!     .unwrap();
//! assert_eq!(measurement::top_outcomes(2, &bell).iter().map(|t| t.0).collect::<Vec<_>>(), vec![0, 3]);
//!
//! let topo = convert(StateKind::FusionSuperposition, &QuantumState::from(bell)).unwrap();
//! assert_eq!(topo.kind(), StateKind::FusionSuperposition);
//! ```

pub mod anyon;
pub mod conversion;
pub mod error;
pub mod fusion;
pub mod kernels;
pub mod measurement;
pub mod quantum_state;
pub mod state_vector;
pub mod validation;

pub use anyon::Charge;
pub use conversion::{conversion_capability, convert, ConversionCapability};
pub use error::{Result, StateError};
pub use fusion::{FusionSuperposition, FusionTree};
pub use measurement::SamplingResult;
pub use quantum_state::QuantumState;
pub use state_vector::{StateVector, MAX_QUBITS};
