//! Gate-to-braid lowering pass
//!
//! Ising braiding only reaches Clifford operations, and with the dense
//! qubit encoding it reaches all of them for registers of one or two
//! qubits. Gates outside that set, or wider registers, are reported as
//! errors rather than approximated.

use crate::braid::{BraidProgram, BraidWord, WordBuilder, MAX_LOWERING_WIDTH};
use crate::error::{LoweringError, Result};
use duoq_core::gate::quarter_turns;
use duoq_core::{Circuit, GateSpec, QuantumError};
use tracing::{debug, trace};

/// Whether `gate` has a braid lowering, judging by its shape alone
///
/// Agrees with [`lower`] for every gate whose qubits fit the register.
pub fn has_lowering(gate: &GateSpec) -> bool {
    matches!(
        gate,
        GateSpec::X(_)
            | GateSpec::Y(_)
            | GateSpec::Z(_)
            | GateSpec::H(_)
            | GateSpec::S(_)
            | GateSpec::Sdg(_)
            | GateSpec::Cnot { .. }
            | GateSpec::Cz(..)
            | GateSpec::Swap(..)
    ) || match gate {
        GateSpec::P(_, theta) | GateSpec::Rx(_, theta) | GateSpec::Ry(_, theta) | GateSpec::Rz(_, theta) => {
            quarter_turns(*theta).is_some()
        }
        _ => false,
    }
}

/// Lower one gate on a register of `width` qubits
///
/// The returned word equals the gate up to a global phase.
///
/// # Errors
/// - [`LoweringError::RegisterTooWide`] for `width` above 2
/// - [`LoweringError::Validation`] for an empty register or invalid indices
/// - [`LoweringError::NoLowering`] for gates braiding cannot reach
///
/// # Example
/// ```
/// use duoq_compiler::lower;
/// use duoq_core::GateSpec;
///
/// assert_eq!(lower(&GateSpec::S(1), 2).unwrap(), vec![2]);
/// assert!(lower(&GateSpec::T(0), 2).is_err());
/// ```
pub fn lower(gate: &GateSpec, width: usize) -> Result<BraidWord> {
    check_width(width)?;
    gate.validate(width)?;

    let mut builder = WordBuilder::new(width);
    let no_lowering = || LoweringError::NoLowering {
        gate: gate.to_string(),
    };

    match gate {
        GateSpec::X(q) => builder.rx_pow(*q, 2),
        GateSpec::Y(q) => builder.s_pow(*q, 2).rx_pow(*q, 2),
        GateSpec::Z(q) => builder.s_pow(*q, 2),
        GateSpec::H(q) => builder.h(*q),
        GateSpec::S(q) => builder.s(*q),
        GateSpec::Sdg(q) => builder.s_pow(*q, 3),
        GateSpec::P(q, theta) | GateSpec::Rz(q, theta) => {
            let k = quarter_turns(*theta).ok_or_else(no_lowering)?;
            builder.s_pow(*q, k)
        }
        GateSpec::Rx(q, theta) => {
            let k = quarter_turns(*theta).ok_or_else(no_lowering)?;
            builder.rx_pow(*q, k)
        }
        GateSpec::Ry(q, theta) => {
            // RY(θ) = S · RX(θ) · S†
            let k = quarter_turns(*theta).ok_or_else(no_lowering)?;
            builder.s_pow(*q, 3).rx_pow(*q, k).s(*q)
        }
        GateSpec::Cnot { control, target } => builder.cnot(*control, *target),
        GateSpec::Cz(..) => builder.cz(),
        GateSpec::Swap(..) => builder.swap(),
        _ => return Err(no_lowering()),
    };

    Ok(builder.finish())
}

/// Lower every gate of `circuit` into one braid program
///
/// `max_width` caps the register further below the braiding limit.
pub fn lower_circuit(circuit: &Circuit, max_width: usize) -> Result<BraidProgram> {
    let width = circuit.num_qubits();
    let max = max_width.min(MAX_LOWERING_WIDTH);
    if width > max {
        return Err(LoweringError::RegisterTooWide { width, max });
    }

    let mut braids = Vec::new();
    for gate in circuit.gates() {
        let word = lower(gate, width)?;
        trace!(gate = %gate, braids = word.len(), "lowered gate");
        braids.extend(word);
    }

    debug!(
        width,
        gates = circuit.len(),
        braids = braids.len(),
        "lowered circuit to braids"
    );
    Ok(BraidProgram {
        width,
        braids,
        gate_count: circuit.len(),
    })
}

fn check_width(width: usize) -> Result<()> {
    if width == 0 {
        return Err(QuantumError::EmptyRegister.into());
    }
    if width > MAX_LOWERING_WIDTH {
        return Err(LoweringError::RegisterTooWide {
            width,
            max: MAX_LOWERING_WIDTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_has_lowering_matches_clifford_set() {
        assert!(has_lowering(&GateSpec::H(0)));
        assert!(has_lowering(&GateSpec::Swap(0, 1)));
        assert!(has_lowering(&GateSpec::Rz(0, -PI / 2.0)));
        assert!(!has_lowering(&GateSpec::T(0)));
        assert!(!has_lowering(&GateSpec::Rx(0, 0.3)));
        assert!(!has_lowering(&GateSpec::Ccx { controls: [0, 1], target: 2 }));
        assert!(!has_lowering(&GateSpec::Cp { control: 0, target: 1, theta: PI }));
    }

    #[test]
    fn test_lower_agrees_with_has_lowering() {
        let gates = [
            GateSpec::X(1),
            GateSpec::Y(0),
            GateSpec::Sdg(1),
            GateSpec::P(0, PI),
            GateSpec::Ry(1, PI / 2.0),
            GateSpec::Cnot { control: 1, target: 0 },
            GateSpec::T(0),
            GateSpec::Tdg(1),
            GateSpec::U3 { qubit: 0, theta: 0.1, phi: 0.2, lambda: 0.3 },
            GateSpec::Crz { control: 0, target: 1, theta: PI },
            GateSpec::Mcz(vec![0, 1]),
        ];
        for gate in &gates {
            assert_eq!(lower(gate, 2).is_ok(), has_lowering(gate), "{}", gate);
        }
    }

    #[test]
    fn test_width_limits() {
        assert_eq!(
            lower(&GateSpec::H(0), 3),
            Err(LoweringError::RegisterTooWide { width: 3, max: 2 })
        );
        assert_eq!(
            lower(&GateSpec::H(0), 0),
            Err(LoweringError::Validation(QuantumError::EmptyRegister))
        );
        assert!(matches!(
            lower(&GateSpec::Cz(0, 1), 1),
            Err(LoweringError::Validation(QuantumError::InvalidQubit { .. }))
        ));
    }

    #[test]
    fn test_zero_angle_lowers_to_empty_word() {
        assert!(lower(&GateSpec::Rz(0, 0.0), 1).unwrap().is_empty());
        assert!(lower(&GateSpec::Rx(1, 2.0 * PI), 2).unwrap().is_empty());
    }

    #[test]
    fn test_lower_circuit() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(0).unwrap().cnot(0, 1).unwrap();
        let program = lower_circuit(&circuit, 2).unwrap();
        assert_eq!(program.width, 2);
        assert_eq!(program.gate_count, 2);
        assert_eq!(program.num_anyons(), 6);
        assert_eq!(
            program.len(),
            lower(&GateSpec::H(0), 2).unwrap().len()
                + lower(&GateSpec::Cnot { control: 0, target: 1 }, 2).unwrap().len()
        );

        assert_eq!(
            lower_circuit(&circuit, 1),
            Err(LoweringError::RegisterTooWide { width: 2, max: 1 })
        );

        circuit.t(1).unwrap();
        assert!(matches!(lower_circuit(&circuit, 2), Err(LoweringError::NoLowering { .. })));
    }
}
