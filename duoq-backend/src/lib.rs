//! Execution backends for duoq
//!
//! This crate provides a unified interface for running quantum operations
//! on two kinds of backend:
//! - [`GateBasedBackend`]: dense state vectors, every gate native
//! - [`TopologicalBackend`]: Ising anyon fusion trees driven by braids,
//!   with gates compiled to braid words
//!
//! # Architecture
//!
//! Both backends implement [`QuantumBackend`]. Each owns one native state
//! representation and rejects states in the other; the [`dispatch`] layer
//! converts between them when a caller mixes the two. Failures carry an
//! [`ErrorKind`] so callers can tell bad input from an operation a backend
//! cannot perform.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gate_based;
pub mod result;
pub mod topological;

pub use backend::QuantumBackend;
pub use config::{GateBasedConfig, TopologicalConfig};
pub use dispatch::{
    apply_sequence, apply_sequence_using, apply_with_conversion, apply_with_conversion_using,
    measure_state, ExactConverter, StateConverter,
};
pub use error::{BackendError, ErrorKind, Result};
pub use gate_based::GateBasedBackend;
pub use result::ShotResults;
pub use topological::TopologicalBackend;
