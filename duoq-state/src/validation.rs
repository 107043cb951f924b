//! Normalization checks and internal invariant guards
//!
//! Two kinds of check live here. [`check_normalized`] rejects caller input
//! and returns an error. [`assert_valid_distribution`] guards against
//! distributions that only a broken gate or braid could produce, and panics.

use crate::error::{Result, StateError};

/// Largest deviation from 1 tolerated in a probability distribution's sum
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Check that `norm` is 1 within `tolerance`
///
/// # Example
/// ```
/// use duoq_state::validation::check_normalized;
///
/// assert!(check_normalized(1.0 + 1e-12, 1e-9).is_ok());
/// assert!(check_normalized(0.5, 1e-9).is_err());
/// ```
pub fn check_normalized(norm: f64, tolerance: f64) -> Result<()> {
    if (norm - 1.0).abs() > tolerance || !norm.is_finite() {
        return Err(StateError::NotNormalized { norm });
    }
    Ok(())
}

/// Panic unless `probabilities` is a valid distribution
///
/// Every entry must be a non-negative number and the entries must sum to 1
/// within [`DISTRIBUTION_TOLERANCE`].
///
/// # Panics
/// On NaN or negative entries, or on a sum off by more than the tolerance.
/// Reaching this panic means a gate or braid broke unitarity.
pub fn assert_valid_distribution(probabilities: &[f64]) {
    let mut total = 0.0;
    for (index, &p) in probabilities.iter().enumerate() {
        if !(p >= 0.0) {
            panic!("invariant violated: probability of outcome {} is {}", index, p);
        }
        total += p;
    }
    if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        panic!("invariant violated: probabilities sum to {}", total);
    }
}
