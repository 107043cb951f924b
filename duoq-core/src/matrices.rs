//! Gate matrices for the closed gate set
//!
//! All matrices are row-major `[[row0], [row1]]` and act on the target
//! qubit of a gate. Multi-qubit gates are applied by the state crate as
//! controlled or diagonal versions of these 2x2 blocks.

use crate::amplitude::{Amplitude, I, ONE, ZERO};
use num_complex::Complex64;

/// 2x2 complex matrix
pub type Matrix2 = [[Amplitude; 2]; 2];

const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);
const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// H = 1/√2 * [[1, 1], [1, -1]]
pub const HADAMARD: Matrix2 = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// X = [[0, 1], [1, 0]]
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Y = [[0, -i], [i, 0]]
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_I], [I, ZERO]];

/// Z = [[1, 0], [0, -1]]
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// S = diag(1, i)
pub const S_GATE: Matrix2 = [[ONE, ZERO], [ZERO, I]];

/// S† = diag(1, -i)
pub const S_GATE_DAGGER: Matrix2 = [[ONE, ZERO], [ZERO, NEG_I]];

/// T = diag(1, e^{iπ/4})
pub const T_GATE: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)],
];

/// T† = diag(1, e^{-iπ/4})
pub const T_GATE_DAGGER: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)],
];

/// RX(θ) = cos(θ/2)·I − i·sin(θ/2)·X
#[inline]
pub fn rotation_x(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
        [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)],
    ]
}

/// RY(θ) = cos(θ/2)·I − i·sin(θ/2)·Y
#[inline]
pub fn rotation_y(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
        [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
    ]
}

/// RZ(θ) = diag(e^{-iθ/2}, e^{iθ/2})
#[inline]
pub fn rotation_z(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// P(θ) = diag(1, e^{iθ})
#[inline]
pub fn phase(theta: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

/// U3(θ, φ, λ) = [[cos(θ/2), -e^{iλ}sin(θ/2)], [e^{iφ}sin(θ/2), e^{i(φ+λ)}cos(θ/2)]]
pub fn u3(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [
            Complex64::new(cos, 0.0),
            -Complex64::from_polar(sin, lambda),
        ],
        [
            Complex64::from_polar(sin, phi),
            Complex64::from_polar(cos, phi + lambda),
        ],
    ]
}

/// Matrix product `a · b`
pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[ZERO; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

/// Conjugate transpose
pub fn dagger(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Whether `m† m = I` within `tolerance`
pub fn is_unitary(m: &Matrix2, tolerance: f64) -> bool {
    let product = multiply(&dagger(m), m);
    (0..2).all(|i| {
        (0..2).all(|j| {
            let expected = if i == j { ONE } else { ZERO };
            (product[i][j] - expected).norm() <= tolerance
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    fn assert_matrix_eq(a: &Matrix2, b: &Matrix2) {
        for i in 0..2 {
            for j in 0..2 {
                assert!(
                    (a[i][j] - b[i][j]).norm() < EPSILON,
                    "entry ({}, {}): {} != {}",
                    i,
                    j,
                    a[i][j],
                    b[i][j]
                );
            }
        }
    }

    #[test]
    fn test_constant_matrices_are_unitary() {
        for m in [
            HADAMARD,
            PAULI_X,
            PAULI_Y,
            PAULI_Z,
            S_GATE,
            S_GATE_DAGGER,
            T_GATE,
            T_GATE_DAGGER,
        ] {
            assert!(is_unitary(&m, EPSILON));
        }
    }

    #[test]
    fn test_rotations_are_unitary() {
        for theta in [0.0, 0.3, PI / 2.0, PI, 2.5 * PI] {
            assert!(is_unitary(&rotation_x(theta), EPSILON));
            assert!(is_unitary(&rotation_y(theta), EPSILON));
            assert!(is_unitary(&rotation_z(theta), EPSILON));
            assert!(is_unitary(&u3(theta, 0.7, -1.1), EPSILON));
        }
    }

    #[test]
    fn test_rx_pi_is_minus_i_x() {
        let rx = rotation_x(PI);
        let expected = [[ZERO, NEG_I], [NEG_I, ZERO]];
        assert_matrix_eq(&rx, &expected);
    }

    #[test]
    fn test_s_squared_is_z() {
        assert_matrix_eq(&multiply(&S_GATE, &S_GATE), &PAULI_Z);
        assert_matrix_eq(&multiply(&T_GATE, &T_GATE), &S_GATE);
    }

    #[test]
    fn test_u3_special_cases() {
        // U3(π/2, 0, π) = H
        assert_matrix_eq(&u3(PI / 2.0, 0.0, PI), &HADAMARD);
        // U3(0, 0, λ) = P(λ)
        assert_matrix_eq(&u3(0.0, 0.0, 0.4), &phase(0.4));
    }

    #[test]
    fn test_s_rx_s_is_hadamard() {
        let product = multiply(&S_GATE, &multiply(&rotation_x(PI / 2.0), &S_GATE));
        assert_matrix_eq(&product, &HADAMARD);
    }
}
