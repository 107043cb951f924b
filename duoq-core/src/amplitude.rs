//! Complex amplitude arithmetic

use num_complex::Complex64;

/// A complex probability amplitude in double precision
pub type Amplitude = Complex64;

/// Tolerance used for every normalization check in the workspace
pub const NORM_TOLERANCE: f64 = 1e-9;

pub const ZERO: Amplitude = Complex64::new(0.0, 0.0);
pub const ONE: Amplitude = Complex64::new(1.0, 0.0);
pub const I: Amplitude = Complex64::new(0.0, 1.0);

/// Sum of squared magnitudes
#[inline]
pub fn norm_sqr_sum(amplitudes: &[Amplitude]) -> f64 {
    amplitudes.iter().map(|a| a.norm_sqr()).sum()
}

/// Euclidean norm of an amplitude vector
#[inline]
pub fn norm(amplitudes: &[Amplitude]) -> f64 {
    norm_sqr_sum(amplitudes).sqrt()
}

/// ⟨a|b⟩, conjugating the left operand
///
/// Callers are responsible for passing slices of equal length; extra
/// entries on either side are ignored.
pub fn inner_product(a: &[Amplitude], b: &[Amplitude]) -> Amplitude {
    a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum()
}

/// Component-wise comparison within `tolerance`
#[inline]
pub fn approx_eq(a: Amplitude, b: Amplitude, tolerance: f64) -> bool {
    (a - b).norm() <= tolerance
}

/// e^{iθ}
#[inline]
pub fn phase(theta: f64) -> Amplitude {
    Complex64::from_polar(1.0, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm() {
        let amps = [Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)];
        assert_relative_eq!(norm(&amps), 1.0, epsilon = 1e-12);
        assert_relative_eq!(norm_sqr_sum(&amps), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inner_product_conjugates_left() {
        let a = [I];
        let b = [ONE];
        assert!(approx_eq(inner_product(&a, &b), Complex64::new(0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_phase() {
        let p = phase(std::f64::consts::FRAC_PI_2);
        assert!(approx_eq(p, I, 1e-12));
    }
}
