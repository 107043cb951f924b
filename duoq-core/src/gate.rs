//! Quantum gate definitions
//!
//! [`GateSpec`] is the closed vocabulary of unitary gates every backend
//! understands. Each variant carries the qubit indices it acts on (and its
//! angles, for parametric gates), so a gate value is a complete instruction.

use crate::matrices::{self, Matrix2};
use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Tolerance for recognising angles that are integer multiples of π/2
const QUARTER_TURN_TOLERANCE: f64 = 1e-12;

/// A gate applied to specific qubits
///
/// Qubit 0 is the least-significant bit of a basis index.
///
/// # Example
/// ```
/// use duoq_core::GateSpec;
///
/// let gate = GateSpec::Cnot { control: 0, target: 1 };
/// assert_eq!(gate.name(), "CNOT");
/// assert_eq!(gate.qubits().as_slice(), &[0, 1]);
/// assert!(gate.validate(2).is_ok());
/// assert!(gate.validate(1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateSpec {
    X(usize),
    Y(usize),
    Z(usize),
    H(usize),
    S(usize),
    Sdg(usize),
    T(usize),
    Tdg(usize),
    /// Phase gate diag(1, e^{iθ})
    P(usize, f64),
    Rx(usize, f64),
    Ry(usize, f64),
    Rz(usize, f64),
    U3 {
        qubit: usize,
        theta: f64,
        phi: f64,
        lambda: f64,
    },
    Cnot {
        control: usize,
        target: usize,
    },
    Cz(usize, usize),
    Swap(usize, usize),
    Cp {
        control: usize,
        target: usize,
        theta: f64,
    },
    Crx {
        control: usize,
        target: usize,
        theta: f64,
    },
    Cry {
        control: usize,
        target: usize,
        theta: f64,
    },
    Crz {
        control: usize,
        target: usize,
        theta: f64,
    },
    /// Multi-controlled Z: flips the sign of basis states where every listed qubit is 1
    Mcz(Vec<usize>),
    /// Toffoli
    Ccx {
        controls: [usize; 2],
        target: usize,
    },
}

/// How a gate touches the state vector
///
/// The state crate picks a kernel from this shape instead of matching on
/// every gate variant.
#[derive(Debug, Clone, PartialEq)]
pub enum GateAction {
    /// 2x2 block on one qubit
    Single { qubit: usize, matrix: Matrix2 },
    /// 2x2 block on `target`, applied only where every control bit is 1
    Controlled {
        controls: SmallVec<[usize; 2]>,
        target: usize,
        matrix: Matrix2,
    },
    /// Exchange of two qubits
    Swap(usize, usize),
}

impl GateSpec {
    /// Canonical upper-case gate name
    pub fn name(&self) -> &'static str {
        match self {
            GateSpec::X(_) => "X",
            GateSpec::Y(_) => "Y",
            GateSpec::Z(_) => "Z",
            GateSpec::H(_) => "H",
            GateSpec::S(_) => "S",
            GateSpec::Sdg(_) => "SDG",
            GateSpec::T(_) => "T",
            GateSpec::Tdg(_) => "TDG",
            GateSpec::P(..) => "P",
            GateSpec::Rx(..) => "RX",
            GateSpec::Ry(..) => "RY",
            GateSpec::Rz(..) => "RZ",
            GateSpec::U3 { .. } => "U3",
            GateSpec::Cnot { .. } => "CNOT",
            GateSpec::Cz(..) => "CZ",
            GateSpec::Swap(..) => "SWAP",
            GateSpec::Cp { .. } => "CP",
            GateSpec::Crx { .. } => "CRX",
            GateSpec::Cry { .. } => "CRY",
            GateSpec::Crz { .. } => "CRZ",
            GateSpec::Mcz(_) => "MCZ",
            GateSpec::Ccx { .. } => "CCX",
        }
    }

    /// Qubits this gate acts on, controls first
    pub fn qubits(&self) -> SmallVec<[usize; 3]> {
        match self {
            GateSpec::X(q)
            | GateSpec::Y(q)
            | GateSpec::Z(q)
            | GateSpec::H(q)
            | GateSpec::S(q)
            | GateSpec::Sdg(q)
            | GateSpec::T(q)
            | GateSpec::Tdg(q)
            | GateSpec::P(q, _)
            | GateSpec::Rx(q, _)
            | GateSpec::Ry(q, _)
            | GateSpec::Rz(q, _)
            | GateSpec::U3 { qubit: q, .. } => smallvec![*q],
            GateSpec::Cnot { control, target }
            | GateSpec::Cp {
                control, target, ..
            }
            | GateSpec::Crx {
                control, target, ..
            }
            | GateSpec::Cry {
                control, target, ..
            }
            | GateSpec::Crz {
                control, target, ..
            } => smallvec![*control, *target],
            GateSpec::Cz(a, b) | GateSpec::Swap(a, b) => smallvec![*a, *b],
            GateSpec::Mcz(qubits) => SmallVec::from_slice(qubits),
            GateSpec::Ccx { controls, target } => smallvec![controls[0], controls[1], *target],
        }
    }

    /// Angle parameters, in declaration order
    pub fn params(&self) -> SmallVec<[f64; 3]> {
        match self {
            GateSpec::P(_, theta)
            | GateSpec::Rx(_, theta)
            | GateSpec::Ry(_, theta)
            | GateSpec::Rz(_, theta)
            | GateSpec::Cp { theta, .. }
            | GateSpec::Crx { theta, .. }
            | GateSpec::Cry { theta, .. }
            | GateSpec::Crz { theta, .. } => smallvec![*theta],
            GateSpec::U3 {
                theta, phi, lambda, ..
            } => smallvec![*theta, *phi, *lambda],
            _ => SmallVec::new(),
        }
    }

    /// Number of qubits the gate acts on
    pub fn arity(&self) -> usize {
        self.qubits().len()
    }

    /// Check indices against a register of `num_qubits`
    ///
    /// # Errors
    /// - [`QuantumError::InvalidQubitCount`] for an MCZ with no qubits
    /// - [`QuantumError::InvalidQubit`] for an index outside `[0, num_qubits)`
    /// - [`QuantumError::DuplicateQubit`] for a repeated index
    /// - [`QuantumError::NonFiniteAngle`] for NaN or infinite angles
    pub fn validate(&self, num_qubits: usize) -> Result<()> {
        let qubits = self.qubits();
        if qubits.is_empty() {
            return Err(QuantumError::invalid_qubit_count(self.name(), 1, 0));
        }

        for &qubit in &qubits {
            if qubit >= num_qubits {
                return Err(QuantumError::invalid_qubit(qubit, num_qubits));
            }
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(QuantumError::DuplicateQubit(qubits[i]));
                }
            }
        }

        if let Some(value) = self.params().into_iter().find(|p| !p.is_finite()) {
            return Err(QuantumError::non_finite_angle(self.name(), value));
        }

        Ok(())
    }

    /// Whether the gate belongs to the Clifford group
    ///
    /// Parametric single-qubit rotations count when their angle is an
    /// integer multiple of π/2.
    pub fn is_clifford(&self) -> bool {
        match self {
            GateSpec::X(_)
            | GateSpec::Y(_)
            | GateSpec::Z(_)
            | GateSpec::H(_)
            | GateSpec::S(_)
            | GateSpec::Sdg(_)
            | GateSpec::Cnot { .. }
            | GateSpec::Cz(..)
            | GateSpec::Swap(..) => true,
            GateSpec::P(_, theta)
            | GateSpec::Rx(_, theta)
            | GateSpec::Ry(_, theta)
            | GateSpec::Rz(_, theta) => quarter_turns(*theta).is_some(),
            _ => false,
        }
    }

    /// The 2x2 block this gate applies to its target qubit
    ///
    /// `None` for SWAP, which is a permutation rather than a block.
    pub fn single_qubit_matrix(&self) -> Option<Matrix2> {
        let matrix = match self {
            GateSpec::X(_) | GateSpec::Cnot { .. } | GateSpec::Ccx { .. } => matrices::PAULI_X,
            GateSpec::Y(_) => matrices::PAULI_Y,
            GateSpec::Z(_) | GateSpec::Cz(..) | GateSpec::Mcz(_) => matrices::PAULI_Z,
            GateSpec::H(_) => matrices::HADAMARD,
            GateSpec::S(_) => matrices::S_GATE,
            GateSpec::Sdg(_) => matrices::S_GATE_DAGGER,
            GateSpec::T(_) => matrices::T_GATE,
            GateSpec::Tdg(_) => matrices::T_GATE_DAGGER,
            GateSpec::P(_, theta) | GateSpec::Cp { theta, .. } => matrices::phase(*theta),
            GateSpec::Rx(_, theta) | GateSpec::Crx { theta, .. } => matrices::rotation_x(*theta),
            GateSpec::Ry(_, theta) | GateSpec::Cry { theta, .. } => matrices::rotation_y(*theta),
            GateSpec::Rz(_, theta) | GateSpec::Crz { theta, .. } => matrices::rotation_z(*theta),
            GateSpec::U3 {
                theta, phi, lambda, ..
            } => matrices::u3(*theta, *phi, *lambda),
            GateSpec::Swap(..) => return None,
        };
        Some(matrix)
    }

    /// Kernel shape for this gate
    pub fn action(&self) -> GateAction {
        let matrix = match self.single_qubit_matrix() {
            Some(matrix) => matrix,
            None => {
                let qubits = self.qubits();
                return GateAction::Swap(qubits[0], qubits[1]);
            }
        };
        match self {
            GateSpec::Cz(a, b) => GateAction::Controlled {
                controls: smallvec![*a],
                target: *b,
                matrix,
            },
            GateSpec::Mcz(_) | GateSpec::Ccx { .. } => {
                let mut qubits = self.qubits();
                let target = qubits.pop().unwrap_or_default();
                GateAction::Controlled {
                    controls: qubits.into_iter().collect(),
                    target,
                    matrix,
                }
            }
            GateSpec::Cnot { control, target }
            | GateSpec::Cp {
                control, target, ..
            }
            | GateSpec::Crx {
                control, target, ..
            }
            | GateSpec::Cry {
                control, target, ..
            }
            | GateSpec::Crz {
                control, target, ..
            } => GateAction::Controlled {
                controls: smallvec![*control],
                target: *target,
                matrix,
            },
            _ => GateAction::Single {
                qubit: self.qubits()[0],
                matrix,
            },
        }
    }
}

/// Number of quarter turns (mod 4) when `theta` is an integer multiple of π/2
///
/// # Example
/// ```
/// use duoq_core::gate::quarter_turns;
/// use std::f64::consts::PI;
///
/// assert_eq!(quarter_turns(PI), Some(2));
/// assert_eq!(quarter_turns(-PI / 2.0), Some(3));
/// assert_eq!(quarter_turns(0.3), None);
/// ```
pub fn quarter_turns(theta: f64) -> Option<u8> {
    if !theta.is_finite() {
        return None;
    }
    let turns = theta / FRAC_PI_2;
    let rounded = turns.round();
    if (turns - rounded).abs() > QUARTER_TURN_TOLERANCE {
        return None;
    }
    Some((rounded as i64).rem_euclid(4) as u8)
}

impl fmt::Display for GateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        let params = self.params();
        if !params.is_empty() {
            write!(f, "[")?;
            for (i, p) in params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", p)?;
            }
            write!(f, "]")?;
        }
        write!(f, "(")?;
        for (i, q) in self.qubits().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "q{}", q)?;
        }
        write!(f, ")")
    }
}
