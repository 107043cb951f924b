//! Fusion trees and superpositions over them
//!
//! A chain of `N` σ anyons is fused left to right. The tree records the
//! cumulative charge after each anyon: `c_0 = 1`, `c_k = σ` for odd `k`,
//! `c_k ∈ {1, ψ}` for even `k`. The last entry `c_N` is the total charge.
//!
//! # Qubit encoding
//!
//! `n` qubits live in `2n + 2` anyons. Qubit `q` is the fusion channel of
//! pair `q` (anyons `2q` and `2q + 1`), which is `c_{2q} × c_{2q+2}`. The
//! last pair makes the total charge vacuum. Basis index `i` therefore maps
//! to the tree whose `c_{2k+2}` is `ψ` exactly when bits `0..=k` of `i`
//! have odd parity, and every vacuum-charge tree is the image of exactly
//! one basis index.

use crate::anyon::{self, Charge};
use crate::error::{Result, StateError};
use crate::measurement;
use crate::state_vector::MAX_QUBITS;
use crate::validation;
use duoq_core::amplitude::ZERO;
use duoq_core::{Amplitude, QuantumError, NORM_TOLERANCE};
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Coefficients smaller than this in magnitude are dropped
const PRUNE_THRESHOLD: f64 = 1e-15;

/// Cumulative charges of a left-to-right fusion of σ anyons
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FusionTree {
    charges: Vec<Charge>,
}

impl FusionTree {
    /// Build a tree from its cumulative charges `c_0..=c_N`
    ///
    /// # Errors
    /// [`StateError::InvalidFusionTree`] unless `N` is even and at least 2,
    /// `c_0` is the vacuum, odd positions are σ and even positions are
    /// `1` or `ψ`.
    pub fn new(charges: Vec<Charge>) -> Result<Self> {
        let num_anyons = charges.len().saturating_sub(1);
        if num_anyons < 2 || num_anyons % 2 != 0 {
            return Err(invalid_tree(format!(
                "a σ chain needs an even number of anyons (at least 2), got {}",
                num_anyons
            )));
        }
        if charges[0] != Charge::Vacuum {
            return Err(invalid_tree("fusion must start from the vacuum".to_string()));
        }
        for (k, &c) in charges.iter().enumerate() {
            let ok = if k % 2 == 1 { c == Charge::Sigma } else { c.is_abelian() };
            if !ok {
                return Err(invalid_tree(format!("charge {} is not allowed at position {}", c, k)));
            }
        }
        Ok(Self { charges })
    }

    /// Tree encoding basis index `index` of an `num_qubits` register
    ///
    /// Bits of `index` beyond `num_qubits` are ignored.
    pub fn from_basis_index(index: usize, num_qubits: usize) -> Self {
        let num_anyons = 2 * num_qubits + 2;
        let mut charges = Vec::with_capacity(num_anyons + 1);
        charges.push(Charge::Vacuum);
        let mut parity = 0;
        for k in 0..=num_qubits {
            charges.push(Charge::Sigma);
            if k < num_qubits {
                parity ^= (index >> k) & 1;
            } else {
                parity = 0;
            }
            charges.push(Charge::from_channel_index(parity));
        }
        Self { charges }
    }

    /// Basis index encoded by the first `num_qubits` pairs
    pub fn basis_index(&self, num_qubits: usize) -> usize {
        (0..num_qubits).fold(0, |index, q| index | ((self.pair_parity(q) as usize) << q))
    }

    pub fn num_anyons(&self) -> usize {
        self.charges.len() - 1
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Charge of the whole chain
    pub fn total_charge(&self) -> Charge {
        self.charges[self.charges.len() - 1]
    }

    /// Fusion channel of anyons `2 * pair` and `2 * pair + 1`, as a bit
    ///
    /// Callers keep `pair` below `num_anyons / 2`.
    pub fn pair_parity(&self, pair: usize) -> u8 {
        let left = self.charges[2 * pair];
        let right = self.charges[2 * pair + 2];
        u8::from(left != right)
    }

    fn with_charge(&self, position: usize, charge: Charge) -> Self {
        let mut charges = self.charges.clone();
        charges[position] = charge;
        Self { charges }
    }
}

impl fmt::Display for FusionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, c) in self.charges.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Normalized superposition over fusion trees of one anyon chain
///
/// The topological counterpart of [`StateVector`](crate::StateVector).
/// Braids are linear maps on the coefficients; like gate application they
/// return a new value.
///
/// # Example
/// ```
/// use duoq_state::FusionSuperposition;
///
/// let vacuum = FusionSuperposition::vacuum(2).unwrap();
/// assert_eq!(vacuum.num_anyons(), 6);
/// assert!(vacuum.is_qubit_encoding());
///
/// // braid 1 mixes the channel of the first pair
/// let mixed = vacuum.apply_braid(1).unwrap();
/// assert_eq!(mixed.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FusionSuperposition {
    num_anyons: usize,
    logical_qubits: usize,
    terms: BTreeMap<FusionTree, Amplitude>,
}

impl FusionSuperposition {
    /// The topological |0...0⟩: every pair in the vacuum channel
    pub fn vacuum(num_qubits: usize) -> Result<Self> {
        check_logical_register(num_qubits)?;
        let mut terms = BTreeMap::new();
        terms.insert(FusionTree::from_basis_index(0, num_qubits), duoq_core::amplitude::ONE);
        Ok(Self {
            num_anyons: 2 * num_qubits + 2,
            logical_qubits: num_qubits,
            terms,
        })
    }

    /// Build a superposition from explicit terms
    ///
    /// Repeated trees have their coefficients summed.
    ///
    /// # Errors
    /// - [`StateError::InvalidFusionTree`] for trees of the wrong length,
    ///   or a chain too short for `logical_qubits`
    /// - [`StateError::NotNormalized`] if the coefficients are not normalized
    ///   or any of them is NaN or infinite
    pub fn from_terms(
        num_anyons: usize,
        logical_qubits: usize,
        terms: impl IntoIterator<Item = (FusionTree, Amplitude)>,
    ) -> Result<Self> {
        check_logical_register(logical_qubits)?;
        if num_anyons < 2 * logical_qubits + 2 || num_anyons % 2 != 0 {
            return Err(invalid_tree(format!(
                "{} anyons cannot hold {} qubits",
                num_anyons, logical_qubits
            )));
        }

        let mut merged: BTreeMap<FusionTree, Amplitude> = BTreeMap::new();
        for (tree, coefficient) in terms {
            if tree.num_anyons() != num_anyons {
                return Err(invalid_tree(format!(
                    "tree {} has {} anyons, expected {}",
                    tree,
                    tree.num_anyons(),
                    num_anyons
                )));
            }
            if !coefficient.is_finite() {
                return Err(StateError::NotNormalized {
                    norm: coefficient.norm(),
                });
            }
            *merged.entry(tree).or_insert(ZERO) += coefficient;
        }

        let state = Self {
            num_anyons,
            logical_qubits,
            terms: pruned(merged),
        };
        validation::check_normalized(state.norm(), NORM_TOLERANCE)?;
        Ok(state)
    }

    /// Build from terms already known to be valid and normalized
    pub(crate) fn from_parts(
        num_anyons: usize,
        logical_qubits: usize,
        terms: BTreeMap<FusionTree, Amplitude>,
    ) -> Self {
        Self {
            num_anyons,
            logical_qubits,
            terms,
        }
    }

    pub fn num_anyons(&self) -> usize {
        self.num_anyons
    }

    pub fn logical_qubits(&self) -> usize {
        self.logical_qubits
    }

    pub fn terms(&self) -> &BTreeMap<FusionTree, Amplitude> {
        &self.terms
    }

    /// Number of trees with a non-negligible coefficient
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.terms.values().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Whether every term lies inside the dense qubit encoding
    ///
    /// True when the chain has exactly `2n + 2` anyons and every tree has
    /// vacuum total charge.
    pub fn is_qubit_encoding(&self) -> bool {
        self.num_anyons == 2 * self.logical_qubits + 2
            && self.terms.keys().all(|t| t.total_charge() == Charge::Vacuum)
    }

    /// |coefficient(tree)|²
    pub fn probability_of(&self, tree: &FusionTree) -> f64 {
        self.terms.get(tree).map_or(0.0, |c| c.norm_sqr())
    }

    /// Counter-clockwise exchange of anyons `index` and `index + 1`
    pub fn apply_braid(&self, index: usize) -> Result<Self> {
        self.exchange(index, false)
    }

    /// Clockwise exchange of anyons `index` and `index + 1`
    pub fn apply_inverse_braid(&self, index: usize) -> Result<Self> {
        self.exchange(index, true)
    }

    /// Apply braid generators first to last
    pub fn apply_braids(&self, word: &[usize]) -> Result<Self> {
        let mut state = self.clone();
        for &index in word {
            state = state.exchange(index, false)?;
        }
        Ok(state)
    }

    /// Exchange acts only on `c_{i+1}`, with neighbours `a = c_i` and `c = c_{i+2}`
    fn exchange(&self, index: usize, inverse: bool) -> Result<Self> {
        if index + 1 >= self.num_anyons {
            return Err(QuantumError::InvalidBraid {
                index,
                num_anyons: self.num_anyons,
            }
            .into());
        }

        let mixing = anyon::exchange_matrix(inverse);
        let mut next: BTreeMap<FusionTree, Amplitude> = BTreeMap::new();

        for (tree, &coefficient) in &self.terms {
            let left = tree.charges[index];
            let right = tree.charges[index + 2];
            match left.fuse_abelian(right) {
                Some(channel) => {
                    let phase = anyon::r_symbol(channel, inverse).unwrap_or(ZERO);
                    *next.entry(tree.clone()).or_insert(ZERO) += coefficient * phase;
                }
                None => {
                    // left is σ: the middle charge is a channel, mix it
                    let from = tree.charges[index + 1].channel_index().unwrap_or(0);
                    for to in 0..2 {
                        let image = tree.with_charge(index + 1, Charge::from_channel_index(to));
                        *next.entry(image).or_insert(ZERO) += mixing[to][from] * coefficient;
                    }
                }
            }
        }

        Ok(Self {
            num_anyons: self.num_anyons,
            logical_qubits: self.logical_qubits,
            terms: pruned(next),
        })
    }

    /// (P(pair channel = 1), P(pair channel = ψ)) for qubit `qubit`
    pub fn pair_parity_probabilities(&self, qubit: usize) -> Result<(f64, f64)> {
        self.check_qubit(qubit)?;
        let mut marginals = (0.0, 0.0);
        for (tree, c) in &self.terms {
            if tree.pair_parity(qubit) == 0 {
                marginals.0 += c.norm_sqr();
            } else {
                marginals.1 += c.norm_sqr();
            }
        }
        Ok(marginals)
    }

    /// Project onto pair `qubit` fusing to `outcome` and renormalize
    pub fn collapse_pair(&self, qubit: usize, outcome: u8) -> Result<Self> {
        if outcome > 1 {
            return Err(QuantumError::InvalidOutcome(outcome).into());
        }
        let (p0, p1) = self.pair_parity_probabilities(qubit)?;
        let probability = if outcome == 0 { p0 } else { p1 };
        if probability <= 0.0 {
            return Err(StateError::ImpossibleOutcome { qubit, outcome });
        }
        if probability < 1e-12 {
            warn!(qubit, outcome, probability, "collapsing onto a numerically negligible fusion channel");
        }

        let scale = 1.0 / probability.sqrt();
        let terms = self
            .terms
            .iter()
            .filter(|(tree, _)| tree.pair_parity(qubit) == outcome)
            .map(|(tree, &c)| (tree.clone(), c * scale))
            .collect();
        Ok(Self {
            num_anyons: self.num_anyons,
            logical_qubits: self.logical_qubits,
            terms,
        })
    }

    /// Sample the channel of pair `qubit` and collapse onto it
    pub fn measure_pair<R: Rng + ?Sized>(&self, rng: &mut R, qubit: usize) -> Result<(u8, Self)> {
        let (_, p1) = self.pair_parity_probabilities(qubit)?;
        let outcome = u8::from(rng.gen::<f64>() < p1);
        Ok((outcome, self.collapse_pair(qubit, outcome)?))
    }

    /// Draw one tree and read off every qubit's pair channel, qubit 0 first
    pub fn sample_basis<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let trees: Vec<&FusionTree> = self.terms.keys().collect();
        let probabilities: Vec<f64> = self.terms.values().map(|c| c.norm_sqr()).collect();
        validation::assert_valid_distribution(&probabilities);
        self.read_bits(trees[measurement::draw(rng, &probabilities)])
    }

    /// `shots` independent draws of [`sample_basis`](Self::sample_basis)
    pub fn sample_shots<R: Rng + ?Sized>(&self, rng: &mut R, shots: usize) -> Result<Vec<Vec<u8>>> {
        if shots < 1 {
            return Err(QuantumError::InvalidShotCount(shots).into());
        }
        let trees: Vec<&FusionTree> = self.terms.keys().collect();
        let probabilities: Vec<f64> = self.terms.values().map(|c| c.norm_sqr()).collect();
        validation::assert_valid_distribution(&probabilities);
        Ok((0..shots)
            .map(|_| self.read_bits(trees[measurement::draw(rng, &probabilities)]))
            .collect())
    }

    /// Multiply every coefficient by `phase`
    pub fn with_global_phase(mut self, phase: Amplitude) -> Self {
        for c in self.terms.values_mut() {
            *c *= phase;
        }
        self
    }

    fn read_bits(&self, tree: &FusionTree) -> Vec<u8> {
        (0..self.logical_qubits).map(|q| tree.pair_parity(q)).collect()
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.logical_qubits {
            return Err(QuantumError::invalid_qubit(qubit, self.logical_qubits).into());
        }
        Ok(())
    }
}

fn pruned(terms: BTreeMap<FusionTree, Amplitude>) -> BTreeMap<FusionTree, Amplitude> {
    terms
        .into_iter()
        .filter(|(_, c)| c.norm() >= PRUNE_THRESHOLD)
        .collect()
}

fn check_logical_register(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 {
        return Err(QuantumError::EmptyRegister.into());
    }
    if num_qubits > MAX_QUBITS {
        return Err(QuantumError::TooManyQubits {
            requested: num_qubits,
            max: MAX_QUBITS,
        }
        .into());
    }
    Ok(())
}

fn invalid_tree(reason: String) -> StateError {
    StateError::InvalidFusionTree { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use duoq_core::amplitude::{self, ONE};
    use num_complex::Complex64;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_tree_validation() {
        use Charge::*;
        assert!(FusionTree::new(vec![Vacuum, Sigma, Psi, Sigma, Psi]).is_ok());
        assert!(FusionTree::new(vec![Vacuum, Sigma, Psi]).is_ok());
        assert!(FusionTree::new(vec![Vacuum, Sigma, Psi, Sigma]).is_err());
        assert!(FusionTree::new(vec![Psi, Sigma, Psi]).is_err());
        assert!(FusionTree::new(vec![Vacuum, Psi, Vacuum]).is_err());
        assert!(FusionTree::new(vec![Vacuum, Sigma, Sigma]).is_err());
    }

    #[test]
    fn test_basis_encoding_round_trip() {
        for n in 1..=4 {
            for index in 0..(1 << n) {
                let tree = FusionTree::from_basis_index(index, n);
                assert_eq!(tree.num_anyons(), 2 * n + 2);
                assert_eq!(tree.total_charge(), Charge::Vacuum);
                assert!(FusionTree::new(tree.charges().to_vec()).is_ok());
                assert_eq!(tree.basis_index(n), index);
            }
        }
    }

    #[test]
    fn test_basis_encoding_is_prefix_parity() {
        use Charge::*;
        // bits q0 = 1, q1 = 1: c2 = ψ, c4 = 1, c6 = 1
        let tree = FusionTree::from_basis_index(0b11, 2);
        assert_eq!(tree.charges(), &[Vacuum, Sigma, Psi, Sigma, Vacuum, Sigma, Vacuum]);
    }

    #[test]
    fn test_vacuum() {
        let state = FusionSuperposition::vacuum(1).unwrap();
        assert_eq!(state.num_anyons(), 4);
        assert_eq!(state.len(), 1);
        assert_relative_eq!(state.norm(), 1.0);
        assert!(FusionSuperposition::vacuum(0).is_err());
    }

    #[test]
    fn test_braid_out_of_range() {
        let state = FusionSuperposition::vacuum(1).unwrap();
        assert!(state.apply_braid(2).is_ok());
        assert_eq!(
            state.apply_braid(3),
            Err(StateError::Validation(QuantumError::InvalidBraid { index: 3, num_anyons: 4 }))
        );
    }

    #[test]
    fn test_phase_braid_keeps_tree() {
        let state = FusionSuperposition::vacuum(1).unwrap();
        let out = state.apply_braid(0).unwrap();
        assert_eq!(out.len(), 1);
        let tree = FusionTree::from_basis_index(0, 1);
        let c = out.terms()[&tree];
        assert!(amplitude::approx_eq(c, amplitude::phase(-std::f64::consts::PI / 8.0), 1e-12));
    }

    #[test]
    fn test_mixing_braid_splits_evenly() {
        let state = FusionSuperposition::vacuum(1).unwrap().apply_braid(1).unwrap();
        assert_eq!(state.len(), 2);
        let (p0, p1) = state.pair_parity_probabilities(0).unwrap();
        assert_relative_eq!(p0, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p1, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_braid_then_inverse_is_identity() {
        let state = FusionSuperposition::vacuum(2).unwrap().apply_braids(&[1, 3, 4]).unwrap();
        for index in 0..5 {
            let back = state.apply_braid(index).unwrap().apply_inverse_braid(index).unwrap();
            assert_eq!(back.len(), state.len());
            for (tree, c) in state.terms() {
                assert!(amplitude::approx_eq(back.terms()[tree], *c, 1e-12));
            }
        }
    }

    #[test]
    fn test_braids_preserve_norm() {
        let state = FusionSuperposition::vacuum(2).unwrap();
        let out = state.apply_braids(&[1, 3, 2, 1, 4, 0, 3, 1]).unwrap();
        assert_relative_eq!(out.norm(), 1.0, epsilon = 1e-12);
        assert!(out.is_qubit_encoding());
    }

    #[test]
    fn test_from_terms() {
        let t0 = FusionTree::from_basis_index(0, 1);
        let t1 = FusionTree::from_basis_index(1, 1);
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let state = FusionSuperposition::from_terms(4, 1, vec![(t0.clone(), h), (t1, h)]).unwrap();
        assert_eq!(state.len(), 2);

        assert!(matches!(
            FusionSuperposition::from_terms(4, 1, vec![(t0.clone(), h)]),
            Err(StateError::NotNormalized { .. })
        ));
        assert!(matches!(
            FusionSuperposition::from_terms(6, 1, vec![(t0, ONE)]),
            Err(StateError::InvalidFusionTree { .. })
        ));
    }

    #[test]
    fn test_from_terms_rejects_non_finite_coefficients() {
        let t0 = FusionTree::from_basis_index(0, 1);
        let t1 = FusionTree::from_basis_index(1, 1);
        for bad in [Complex64::new(f64::NAN, 0.0), Complex64::new(0.0, f64::INFINITY)] {
            let result = FusionSuperposition::from_terms(4, 1, vec![(t0.clone(), ONE), (t1.clone(), bad)]);
            assert!(matches!(result, Err(StateError::NotNormalized { .. })));
        }
    }

    #[test]
    fn test_odd_total_charge_is_not_encoding() {
        use Charge::*;
        let tree = FusionTree::new(vec![Vacuum, Sigma, Vacuum, Sigma, Psi]).unwrap();
        let state = FusionSuperposition::from_terms(4, 1, vec![(tree, ONE)]).unwrap();
        assert!(!state.is_qubit_encoding());
    }

    #[test]
    fn test_collapse_pair() {
        let state = FusionSuperposition::vacuum(1).unwrap().apply_braid(1).unwrap();
        let collapsed = state.collapse_pair(0, 1).unwrap();
        assert_eq!(collapsed.len(), 1);
        assert_relative_eq!(collapsed.norm(), 1.0, epsilon = 1e-12);
        let (p0, p1) = collapsed.pair_parity_probabilities(0).unwrap();
        assert_eq!(p0, 0.0);
        assert_relative_eq!(p1, 1.0, epsilon = 1e-12);

        assert!(state.collapse_pair(0, 2).is_err());
        assert!(state.collapse_pair(1, 0).is_err());
        assert_eq!(
            collapsed.collapse_pair(0, 0),
            Err(StateError::ImpossibleOutcome { qubit: 0, outcome: 0 })
        );
    }

    #[test]
    fn test_sample_basis_on_vacuum() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = FusionSuperposition::vacuum(2).unwrap();
        for _ in 0..50 {
            assert_eq!(state.sample_basis(&mut rng), vec![0, 0]);
        }
        assert!(state.sample_shots(&mut rng, 0).is_err());
    }
}
