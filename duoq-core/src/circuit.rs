//! Quantum circuit representation

use crate::{GateSpec, QuantumError, QuantumOperation, Result};
use serde::{Deserialize, Serialize};

/// A quantum circuit
///
/// A qubit count plus an ordered gate list. Every gate is validated when it
/// is added, so a `Circuit` built through its methods always references
/// in-range, pairwise-distinct qubits.
///
/// # Example
/// ```
/// use duoq_core::Circuit;
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(0).unwrap().cnot(0, 1).unwrap();
/// assert_eq!(circuit.len(), 2);
/// assert_eq!(circuit.depth(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<GateSpec>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits
    ///
    /// # Errors
    /// [`QuantumError::EmptyRegister`] if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyRegister);
        }
        Ok(Self {
            num_qubits,
            gates: Vec::new(),
        })
    }

    /// Create a circuit from an existing gate list, validating every gate
    pub fn from_gates(num_qubits: usize, gates: Vec<GateSpec>) -> Result<Self> {
        let circuit = Self { num_qubits, gates };
        circuit.validate()?;
        Ok(circuit)
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Append a gate after validating it against the register
    pub fn push(&mut self, gate: GateSpec) -> Result<()> {
        gate.validate(self.num_qubits)?;
        self.gates.push(gate);
        Ok(())
    }

    fn chain(&mut self, gate: GateSpec) -> Result<&mut Self> {
        self.push(gate)?;
        Ok(self)
    }

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::H(qubit))
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::X(qubit))
    }

    pub fn y(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::Y(qubit))
    }

    pub fn z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::Z(qubit))
    }

    pub fn s(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::S(qubit))
    }

    pub fn sdg(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::Sdg(qubit))
    }

    pub fn t(&mut self, qubit: usize) -> Result<&mut Self> {
        self.chain(GateSpec::T(qubit))
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.chain(GateSpec::Rx(qubit, theta))
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.chain(GateSpec::Ry(qubit, theta))
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.chain(GateSpec::Rz(qubit, theta))
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.chain(GateSpec::Cnot { control, target })
    }

    pub fn cz(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.chain(GateSpec::Cz(a, b))
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.chain(GateSpec::Swap(a, b))
    }

    /// Gates in execution order
    pub fn gates(&self) -> &[GateSpec] {
        &self.gates
    }

    /// Gates wrapped as backend operations
    pub fn operations(&self) -> impl Iterator<Item = QuantumOperation> + '_ {
        self.gates.iter().cloned().map(QuantumOperation::Gate)
    }

    /// Number of layers when every gate is scheduled as early as its qubits allow
    ///
    /// Qubits outside the register, which only an unvalidated circuit can
    /// carry, are ignored.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.num_qubits];
        let mut depth = 0;
        for gate in &self.gates {
            let qubits = gate.qubits();
            let next = qubits.iter().filter_map(|&q| layer.get(q)).max().copied().unwrap_or(0) + 1;
            for &q in &qubits {
                if let Some(slot) = layer.get_mut(q) {
                    *slot = next;
                }
            }
            depth = depth.max(next);
        }
        depth
    }

    /// Validate the register size and every gate
    ///
    /// Circuits arriving through serde skip the checks done by [`push`](Self::push),
    /// so backends call this before execution.
    pub fn validate(&self) -> Result<()> {
        if self.num_qubits == 0 {
            return Err(QuantumError::EmptyRegister);
        }
        self.gates
            .iter()
            .try_for_each(|gate| gate.validate(self.num_qubits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_register_rejected() {
        assert_eq!(Circuit::new(0), Err(QuantumError::EmptyRegister));
    }

    #[test]
    fn test_push_validates() {
        let mut circuit = Circuit::new(2).unwrap();
        assert!(circuit.push(GateSpec::X(2)).is_err());
        assert!(circuit.cnot(1, 1).is_err());
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_from_gates_validates() {
        let result = Circuit::from_gates(2, vec![GateSpec::H(0), GateSpec::Cz(0, 5)]);
        assert_eq!(result, Err(QuantumError::invalid_qubit(5, 2)));
    }

    #[test]
    fn test_depth_parallel_layers() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.h(0).unwrap().h(1).unwrap().h(2).unwrap();
        assert_eq!(circuit.depth(), 1);

        circuit.cnot(0, 1).unwrap();
        assert_eq!(circuit.depth(), 2);

        circuit.x(2).unwrap();
        assert_eq!(circuit.depth(), 2);

        circuit.cnot(1, 2).unwrap();
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_depth_of_unvalidated_circuit() {
        let circuit = Circuit {
            num_qubits: 1,
            gates: vec![GateSpec::X(0), GateSpec::Cnot { control: 0, target: 3 }, GateSpec::Z(5)],
        };
        assert_eq!(circuit.depth(), 2);
        assert!(circuit.validate().is_err());
    }

    #[test]
    fn test_operations_wrap_gates() {
        let mut circuit = Circuit::new(1).unwrap();
        circuit.h(0).unwrap().s(0).unwrap();
        let ops: Vec<_> = circuit.operations().collect();
        assert_eq!(
            ops,
            vec![
                QuantumOperation::Gate(GateSpec::H(0)),
                QuantumOperation::Gate(GateSpec::S(0)),
            ]
        );
    }

    #[test]
    fn test_validate_deserialized_circuit() {
        let json = r#"{"num_qubits":1,"gates":[{"Cnot":{"control":0,"target":1}}]}"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        assert!(circuit.validate().is_err());
    }
}
