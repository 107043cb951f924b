//! Computational basis measurement
//!
//! Pure functions over a [`StateVector`]. Sampling functions draw from a
//! caller-supplied random source, so a seeded generator always reproduces
//! the same outcome sequence:
//!
//! ```
//! use duoq_core::GateSpec;
//! use duoq_state::{measurement, StateVector};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let state = StateVector::new(2).unwrap().apply_gate(&GateSpec::H(0)).unwrap();
//! let first = measurement::sample_measurements(&mut StdRng::seed_from_u64(7), 20, &state).unwrap();
//! let second = measurement::sample_measurements(&mut StdRng::seed_from_u64(7), 20, &state).unwrap();
//! assert_eq!(first, second);
//! ```
//!
//! Probability-weighted functions treat NaN or negative probabilities as an
//! internal invariant violation and panic (see
//! [`assert_valid_distribution`]).

use crate::error::{Result, StateError};
use crate::state_vector::StateVector;
use crate::validation::assert_valid_distribution;
use duoq_core::amplitude::ZERO;
use duoq_core::QuantumError;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::warn;

/// Outcomes rarer than this are collapsed onto with a warning
const SUSPECT_PROBABILITY: f64 = 1e-12;

/// Frequency table over basis indices
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingResult {
    /// Map from basis state index to count
    pub counts: BTreeMap<usize, usize>,

    /// Total number of shots
    pub shots: usize,
}

impl SamplingResult {
    pub fn new(shots: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            shots,
        }
    }

    pub fn add_outcome(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn get_count(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Relative frequency (count / shots)
    pub fn get_probability(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// Outcomes by descending count, ties by ascending index
    pub fn sorted_outcomes(&self) -> Vec<(usize, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        outcomes
    }

    /// Counts keyed by bitstring, qubit 0 printed first
    pub fn to_bitstring_counts(&self, num_qubits: usize) -> BTreeMap<String, usize> {
        self.counts
            .iter()
            .map(|(&outcome, &count)| (bitstring(outcome, num_qubits), count))
            .collect()
    }
}

/// Per-qubit bits of a basis index, qubit 0 first
///
/// ```
/// use duoq_state::measurement::bits_of;
///
/// assert_eq!(bits_of(0b110, 3), vec![0, 1, 1]);
/// ```
pub fn bits_of(index: usize, num_qubits: usize) -> Vec<u8> {
    (0..num_qubits).map(|q| ((index >> q) & 1) as u8).collect()
}

/// Render a basis index as a bitstring, qubit 0 first
pub fn bitstring(index: usize, num_qubits: usize) -> String {
    bits_of(index, num_qubits)
        .into_iter()
        .map(|b| if b == 1 { '1' } else { '0' })
        .collect()
}

/// |amplitude(index)|²
pub fn basis_state_probability(index: usize, state: &StateVector) -> Result<f64> {
    state.amplitude(index).map(|a| a.norm_sqr()).ok_or_else(|| {
        QuantumError::BasisIndexOutOfRange {
            index,
            dimension: state.dimension(),
        }
        .into()
    })
}

/// Probability of every basis state
pub fn probability_distribution(state: &StateVector) -> Vec<f64> {
    let probabilities = state.probabilities();
    assert_valid_distribution(&probabilities);
    probabilities
}

/// (P(q = 0), P(q = 1))
pub fn qubit_marginal_probabilities(qubit: usize, state: &StateVector) -> Result<(f64, f64)> {
    check_qubit(qubit, state)?;
    let mask = 1usize << qubit;
    let mut marginals = (0.0, 0.0);
    for (i, p) in probability_distribution(state).into_iter().enumerate() {
        if i & mask == 0 {
            marginals.0 += p;
        } else {
            marginals.1 += p;
        }
    }
    Ok(marginals)
}

/// Draw one basis index
pub fn sample_computational_basis<R: Rng + ?Sized>(rng: &mut R, state: &StateVector) -> usize {
    let probabilities = probability_distribution(state);
    draw(rng, &probabilities)
}

/// Draw one bit for `qubit` from its marginal distribution
pub fn sample_single_qubit<R: Rng + ?Sized>(rng: &mut R, qubit: usize, state: &StateVector) -> Result<u8> {
    let (_, p1) = qubit_marginal_probabilities(qubit, state)?;
    Ok(u8::from(rng.gen::<f64>() < p1))
}

/// Project onto `qubit == outcome` and renormalize
///
/// # Errors
/// - [`QuantumError::InvalidOutcome`] unless `outcome` is 0 or 1
/// - [`QuantumError::InvalidQubit`] for an out-of-range qubit
/// - [`StateError::ImpossibleOutcome`] if the outcome has zero probability
pub fn collapse_after_measurement(qubit: usize, outcome: u8, state: &StateVector) -> Result<StateVector> {
    if outcome > 1 {
        return Err(QuantumError::InvalidOutcome(outcome).into());
    }
    let (p0, p1) = qubit_marginal_probabilities(qubit, state)?;
    let probability = if outcome == 0 { p0 } else { p1 };
    if probability <= 0.0 {
        return Err(StateError::ImpossibleOutcome { qubit, outcome });
    }
    if probability < SUSPECT_PROBABILITY {
        warn!(qubit, outcome, probability, "collapsing onto a numerically negligible outcome");
    }

    let mask = 1usize << qubit;
    let keep = if outcome == 0 { 0 } else { mask };
    let scale = 1.0 / probability.sqrt();
    let amplitudes = state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, &a)| if i & mask == keep { a * scale } else { ZERO })
        .collect();
    Ok(StateVector::from_parts(state.num_qubits(), amplitudes))
}

/// Sample `qubit` and collapse onto the result
pub fn measure_qubit<R: Rng + ?Sized>(rng: &mut R, qubit: usize, state: &StateVector) -> Result<(u8, StateVector)> {
    let outcome = sample_single_qubit(rng, qubit, state)?;
    let collapsed = collapse_after_measurement(qubit, outcome, state)?;
    Ok((outcome, collapsed))
}

/// `count` independent basis-index draws
pub fn sample_measurements<R: Rng + ?Sized>(rng: &mut R, count: usize, state: &StateVector) -> Result<Vec<usize>> {
    if count < 1 {
        return Err(QuantumError::InvalidShotCount(count).into());
    }
    let probabilities = probability_distribution(state);
    Ok((0..count).map(|_| draw(rng, &probabilities)).collect())
}

/// Frequency table over `count` draws
pub fn sample_and_count<R: Rng + ?Sized>(rng: &mut R, count: usize, state: &StateVector) -> Result<SamplingResult> {
    let mut result = SamplingResult::new(count);
    for outcome in sample_measurements(rng, count, state)? {
        result.add_outcome(outcome);
    }
    Ok(result)
}

/// Highest-probability basis index, lowest index on ties
pub fn most_likely_outcome(state: &StateVector) -> usize {
    let probabilities = probability_distribution(state);
    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > probabilities[best] {
            best = i;
        }
    }
    best
}

/// The `k` most likely outcomes by descending probability, ties by ascending index
///
/// Returns all 2^n outcomes when `k` exceeds the dimension.
pub fn top_outcomes(k: usize, state: &StateVector) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = probability_distribution(state).into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// Σ P(i)·f(i)
pub fn expected_value<F: Fn(usize) -> f64>(f: F, state: &StateVector) -> f64 {
    probability_distribution(state)
        .into_iter()
        .enumerate()
        .map(|(i, p)| p * f(i))
        .sum()
}

/// √(E[f²] − E[f]²)
pub fn standard_deviation<F: Fn(usize) -> f64>(f: F, state: &StateVector) -> f64 {
    let probabilities = probability_distribution(state);
    let (mean, mean_sq) = probabilities
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(m, m2), (i, &p)| {
            let v = f(i);
            (m + p * v, m2 + p * v * v)
        });
    // rounding can push a zero variance slightly negative
    (mean_sq - mean * mean).max(0.0).sqrt()
}

fn check_qubit(qubit: usize, state: &StateVector) -> Result<()> {
    if qubit >= state.num_qubits() {
        return Err(QuantumError::invalid_qubit(qubit, state.num_qubits()).into());
    }
    Ok(())
}

/// Inverse-CDF draw from a distribution already checked to sum to 1
pub(crate) fn draw<R: Rng + ?Sized>(rng: &mut R, probabilities: &[f64]) -> usize {
    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    let mut last_nonzero = 0;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > 0.0 {
            cumulative += p;
            last_nonzero = i;
            if r < cumulative {
                return i;
            }
        }
    }
    // r landed in the rounding gap above the cumulative sum
    last_nonzero
}
