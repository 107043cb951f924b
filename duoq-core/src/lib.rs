//! Core types for the duoq quantum simulator
//!
//! This crate holds the vocabulary shared by every backend:
//! - [`Amplitude`] arithmetic and the [`matrices`] of the gate set
//! - [`GateSpec`]: the closed set of unitary gates
//! - [`QuantumOperation`]: gates, braids, measurements and extensions
//! - [`Circuit`]: a validated gate list
//!
//! # Example
//! ```
//! use duoq_core::{Circuit, GateSpec};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.h(0).unwrap();
//! circuit.push(GateSpec::Cnot { control: 0, target: 1 }).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod amplitude;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod matrices;
pub mod operation;

pub use amplitude::{Amplitude, NORM_TOLERANCE};
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{GateAction, GateSpec};
pub use matrices::Matrix2;
pub use num_complex::Complex64;
pub use operation::{Extension, QuantumOperation, StateKind};

/// Type alias for results in duoq
pub type Result<T> = std::result::Result<T, QuantumError>;
