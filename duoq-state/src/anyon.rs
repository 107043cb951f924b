//! Ising anyon model data
//!
//! Three charges: the vacuum `1`, the non-abelian `σ` and the fermion `ψ`.
//! Fusion rules: `σ × σ = 1 + ψ`, `σ × ψ = σ`, `ψ × ψ = 1`.
//!
//! Braiding two σ anyons whose pair fuses to a definite channel multiplies
//! by the R-symbol of that channel. When the channel is not definite in the
//! current basis, an F-move rotates into a basis where it is, giving the
//! 2x2 exchange matrix `F · R · F`.

use duoq_core::amplitude::{self, ZERO};
use duoq_core::{matrices, Amplitude, Matrix2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Topological charge of an Ising anyon or of a group of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Charge {
    Vacuum,
    Sigma,
    Psi,
}

impl Charge {
    pub fn is_abelian(self) -> bool {
        !matches!(self, Charge::Sigma)
    }

    /// Fusion of two abelian charges; `None` if either is σ
    pub fn fuse_abelian(self, other: Charge) -> Option<Charge> {
        match (self, other) {
            (Charge::Sigma, _) | (_, Charge::Sigma) => None,
            (a, b) if a == b => Some(Charge::Vacuum),
            _ => Some(Charge::Psi),
        }
    }

    /// Channel index used by the 2x2 matrices: 0 for `1`, 1 for `ψ`
    pub(crate) fn channel_index(self) -> Option<usize> {
        match self {
            Charge::Vacuum => Some(0),
            Charge::Psi => Some(1),
            Charge::Sigma => None,
        }
    }

    pub(crate) fn from_channel_index(index: usize) -> Charge {
        if index == 0 {
            Charge::Vacuum
        } else {
            Charge::Psi
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Charge::Vacuum => "1",
            Charge::Sigma => "σ",
            Charge::Psi => "ψ",
        }
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `R^{σσ}_c` for a pair of σ anyons fusing to `channel`
///
/// `R^{σσ}_1 = e^{-iπ/8}`, `R^{σσ}_ψ = e^{3iπ/8}`. The clockwise exchange
/// (`inverse`) uses the complex conjugate. `None` for a σ channel, which
/// two σ anyons cannot fuse to.
pub fn r_symbol(channel: Charge, inverse: bool) -> Option<Amplitude> {
    let angle = match channel {
        Charge::Vacuum => -PI / 8.0,
        Charge::Psi => 3.0 * PI / 8.0,
        Charge::Sigma => return None,
    };
    Some(amplitude::phase(if inverse { -angle } else { angle }))
}

/// `F^{σσσ}_σ = (1/√2)[[1, 1], [1, -1]]`, indexed by channel (`1`, `ψ`)
pub const F_SIGMA: Matrix2 = matrices::HADAMARD;

/// `F · diag(R_1, R_ψ) · F`, the exchange of two σ anyons whose left
/// neighbourhood has total charge σ
pub fn exchange_matrix(inverse: bool) -> Matrix2 {
    let r_diag = [
        [r_symbol(Charge::Vacuum, inverse).unwrap_or(ZERO), ZERO],
        [ZERO, r_symbol(Charge::Psi, inverse).unwrap_or(ZERO)],
    ];
    matrices::multiply(&F_SIGMA, &matrices::multiply(&r_diag, &F_SIGMA))
}
