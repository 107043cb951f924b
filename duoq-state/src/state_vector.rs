//! Dense state vector with pure gate application

use crate::error::{Result, StateError};
use crate::kernels;
use crate::validation::check_normalized;
use duoq_core::amplitude::{self, ONE, ZERO};
use duoq_core::{Amplitude, GateAction, GateSpec, QuantumError, NORM_TOLERANCE};

/// Largest register a dense state vector may hold
pub const MAX_QUBITS: usize = 30;

/// Quantum state as 2^n complex amplitudes
///
/// Index `i` is the computational basis state whose bits are the binary
/// expansion of `i`, qubit 0 being the least-significant bit. Gate
/// application returns a new vector; the value a caller holds is never
/// changed underneath them.
///
/// # Example
///
/// ```
/// use duoq_core::GateSpec;
/// use duoq_state::StateVector;
///
/// let zero = StateVector::new(1).unwrap();
/// let plus = zero.apply_gate(&GateSpec::H(0)).unwrap();
/// assert!((plus.amplitudes()[1].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert_eq!(zero.amplitudes()[1].re, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Amplitude>,
}

impl StateVector {
    /// Create |0...0⟩ on `num_qubits` qubits
    ///
    /// # Errors
    /// - [`QuantumError::EmptyRegister`] if `num_qubits` is 0
    /// - [`QuantumError::TooManyQubits`] above [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`
    pub fn basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        check_register(num_qubits)?;
        let dimension = 1usize << num_qubits;
        if index >= dimension {
            return Err(QuantumError::BasisIndexOutOfRange { index, dimension }.into());
        }
        let mut amplitudes = vec![ZERO; dimension];
        amplitudes[index] = ONE;
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a state from explicit amplitudes
    ///
    /// # Errors
    /// - [`StateError::DimensionMismatch`] unless `amplitudes.len() == 2^num_qubits`
    /// - [`StateError::NotNormalized`] if the norm is off by more than 1e-9
    ///   or is not finite
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Amplitude]) -> Result<Self> {
        check_register(num_qubits)?;
        let expected = 1usize << num_qubits;
        if amplitudes.len() != expected {
            return Err(StateError::DimensionMismatch {
                expected,
                actual: amplitudes.len(),
            });
        }
        check_normalized(amplitude::norm(amplitudes), NORM_TOLERANCE)?;
        Ok(Self {
            num_qubits,
            amplitudes: amplitudes.to_vec(),
        })
    }

    /// Build from parts already known to be consistent
    pub(crate) fn from_parts(num_qubits: usize, amplitudes: Vec<Amplitude>) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// 2^num_qubits
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    /// Amplitude of basis state `index`, if it exists
    #[inline]
    pub fn amplitude(&self, index: usize) -> Option<Amplitude> {
        self.amplitudes.get(index).copied()
    }

    pub fn norm(&self) -> f64 {
        amplitude::norm(&self.amplitudes)
    }

    /// Check if |norm - 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Squared magnitudes of every amplitude
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// ⟨self|other⟩
    pub fn inner_product(&self, other: &StateVector) -> Result<Amplitude> {
        if self.dimension() != other.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }
        Ok(amplitude::inner_product(&self.amplitudes, &other.amplitudes))
    }

    /// |⟨self|other⟩|², insensitive to global phase
    pub fn fidelity(&self, other: &StateVector) -> Result<f64> {
        Ok(self.inner_product(other)?.norm_sqr())
    }

    /// Apply a gate, returning the new state
    pub fn apply_gate(&self, gate: &GateSpec) -> Result<StateVector> {
        self.clone().with_gate(gate)
    }

    /// Apply a gate, consuming `self`
    ///
    /// Same result as [`apply_gate`](Self::apply_gate) without the copy; the
    /// backends use it to fold a circuit over one buffer.
    ///
    /// # Errors
    /// Any [`QuantumError`] from [`GateSpec::validate`]; the state is dropped
    /// in that case.
    pub fn with_gate(mut self, gate: &GateSpec) -> Result<StateVector> {
        gate.validate(self.num_qubits)?;

        match gate.action() {
            GateAction::Single { qubit, matrix } => {
                kernels::apply_single(&mut self.amplitudes, &matrix, qubit);
            }
            GateAction::Controlled {
                controls,
                target,
                matrix,
            } => {
                let control_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
                match kernels::diagonal_phase(&matrix) {
                    Some(phase) => {
                        kernels::apply_diagonal_phase(
                            &mut self.amplitudes,
                            control_mask | (1 << target),
                            phase,
                        );
                    }
                    None => {
                        kernels::apply_controlled(&mut self.amplitudes, &matrix, control_mask, target);
                    }
                }
            }
            GateAction::Swap(a, b) => kernels::apply_swap(&mut self.amplitudes, a, b),
        }

        Ok(self)
    }

    /// Apply gates in order
    pub fn apply_gates(&self, gates: &[GateSpec]) -> Result<StateVector> {
        gates
            .iter()
            .try_fold(self.clone(), |state, gate| state.with_gate(gate))
    }

    /// Multiply every amplitude by e^{iφ}
    pub fn with_global_phase(mut self, phi: f64) -> StateVector {
        kernels::apply_global_phase(&mut self.amplitudes, amplitude::phase(phi));
        self
    }
}

fn check_register(num_qubits: usize) -> Result<()> {
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
