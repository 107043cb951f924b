//! Scalar gate kernels on amplitude slices
//!
//! Every kernel works in place on a slice of length 2^n. Callers validate
//! qubit indices beforehand; kernels index without bounds checks beyond the
//! slice's own.

use duoq_core::{Amplitude, Matrix2};

/// Apply a 2x2 matrix to `qubit`
///
/// Pairs amplitudes whose indices differ only in bit `qubit` and applies
/// the matrix to each pair.
pub fn apply_single(state: &mut [Amplitude], matrix: &Matrix2, qubit: usize) {
    let mask = 1usize << qubit;
    let [[m00, m01], [m10, m11]] = *matrix;

    for i in 0..state.len() {
        if i & mask != 0 {
            continue;
        }
        let j = i | mask;
        let (a0, a1) = (state[i], state[j]);
        state[i] = m00 * a0 + m01 * a1;
        state[j] = m10 * a0 + m11 * a1;
    }
}

/// Apply a 2x2 matrix to `target` on every basis state where all bits of
/// `control_mask` are set
pub fn apply_controlled(state: &mut [Amplitude], matrix: &Matrix2, control_mask: usize, target: usize) {
    let target_mask = 1usize << target;
    let [[m00, m01], [m10, m11]] = *matrix;

    for i in 0..state.len() {
        if i & target_mask != 0 || i & control_mask != control_mask {
            continue;
        }
        let j = i | target_mask;
        let (a0, a1) = (state[i], state[j]);
        state[i] = m00 * a0 + m01 * a1;
        state[j] = m10 * a0 + m11 * a1;
    }
}

/// Multiply by `phase` every amplitude whose index has all bits of `mask` set
///
/// Covers CZ, CP and MCZ without touching the other amplitudes.
pub fn apply_diagonal_phase(state: &mut [Amplitude], mask: usize, phase: Amplitude) {
    for (i, amp) in state.iter_mut().enumerate() {
        if i & mask == mask {
            *amp *= phase;
        }
    }
}

/// Exchange qubits `a` and `b`
pub fn apply_swap(state: &mut [Amplitude], a: usize, b: usize) {
    let (mask_a, mask_b) = (1usize << a, 1usize << b);
    for i in 0..state.len() {
        // visit each |..1..0..> / |..0..1..> pair once, from the side where a is set
        if i & mask_a != 0 && i & mask_b == 0 {
            state.swap(i, i ^ mask_a ^ mask_b);
        }
    }
}

/// Multiply every amplitude by `phase`
pub fn apply_global_phase(state: &mut [Amplitude], phase: Amplitude) {
    for amp in state.iter_mut() {
        *amp *= phase;
    }
}

/// Whether `matrix` is diag(1, λ), returning λ
pub fn diagonal_phase(matrix: &Matrix2) -> Option<Amplitude> {
    let [[m00, m01], [m10, m11]] = *matrix;
    let is_identity_top = m00.re == 1.0 && m00.im == 0.0;
    let is_diagonal = m01.norm_sqr() == 0.0 && m10.norm_sqr() == 0.0;
    (is_identity_top && is_diagonal).then_some(m11)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use duoq_core::amplitude::{ONE, ZERO};
    use duoq_core::matrices;
    use num_complex::Complex64;

    fn basis(n: usize, index: usize) -> Vec<Amplitude> {
        let mut v = vec![ZERO; 1 << n];
        v[index] = ONE;
        v
    }

    #[test]
    fn test_single_x_flips_target_only() {
        let mut state = basis(3, 0b000);
        apply_single(&mut state, &matrices::PAULI_X, 1);
        assert_relative_eq!(state[0b010].re, 1.0);
        assert_relative_eq!(state[0b000].norm(), 0.0);
    }

    #[test]
    fn test_controlled_respects_mask() {
        let mut state = basis(2, 0b00);
        apply_controlled(&mut state, &matrices::PAULI_X, 0b01, 1);
        assert_relative_eq!(state[0b00].re, 1.0);

        let mut state = basis(2, 0b01);
        apply_controlled(&mut state, &matrices::PAULI_X, 0b01, 1);
        assert_relative_eq!(state[0b11].re, 1.0);
    }

    #[test]
    fn test_toffoli_needs_both_controls() {
        let mut state = basis(3, 0b001);
        apply_controlled(&mut state, &matrices::PAULI_X, 0b011, 2);
        assert_relative_eq!(state[0b001].re, 1.0);

        let mut state = basis(3, 0b011);
        apply_controlled(&mut state, &matrices::PAULI_X, 0b011, 2);
        assert_relative_eq!(state[0b111].re, 1.0);
    }

    #[test]
    fn test_diagonal_phase_on_mask() {
        let mut state = vec![Complex64::new(0.5, 0.0); 4];
        apply_diagonal_phase(&mut state, 0b11, Complex64::new(-1.0, 0.0));
        assert_relative_eq!(state[0b11].re, -0.5);
        assert_relative_eq!(state[0b01].re, 0.5);
    }

    #[test]
    fn test_swap_moves_amplitude() {
        let mut state = basis(3, 0b001);
        apply_swap(&mut state, 0, 2);
        assert_relative_eq!(state[0b100].re, 1.0);

        let mut state = basis(3, 0b101);
        apply_swap(&mut state, 0, 2);
        assert_relative_eq!(state[0b101].re, 1.0);
    }

    #[test]
    fn test_diagonal_detection() {
        assert!(diagonal_phase(&matrices::PAULI_Z).is_some());
        assert!(diagonal_phase(&matrices::phase(0.3)).is_some());
        assert!(diagonal_phase(&matrices::PAULI_X).is_none());
        assert!(diagonal_phase(&matrices::rotation_z(0.3)).is_none());
    }
}
