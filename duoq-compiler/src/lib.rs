//! Gate-to-braid compilation for duoq
//!
//! The topological backend only braids anyons. This crate turns gates into
//! braid words as a separate, pure pass:
//! - [`lower`]: one gate to a [`BraidWord`]
//! - [`lower_circuit`]: a whole circuit to a [`BraidProgram`]
//! - [`has_lowering`]: the shape-only predicate backends answer support
//!   queries with

pub mod braid;
pub mod error;
pub mod lowering;

pub use braid::{anyons_for, BraidProgram, BraidWord, MAX_LOWERING_WIDTH};
pub use error::{LoweringError, Result};
pub use lowering::{has_lowering, lower, lower_circuit};
