//! Braid words and the generator identities lowering is built from
//!
//! A register of `w` qubits lives in `2w + 2` σ anyons, so it has
//! `2w + 1` braid generators. Up to global phase each generator is a
//! Clifford operation on the encoded qubits:
//!
//! | width | generator | action            |
//! |-------|-----------|-------------------|
//! | 1     | 0, 2      | S on q0           |
//! | 1     | 1         | RX(π/2) on q0     |
//! | 2     | 0         | S on q0           |
//! | 2     | 1         | RXX(π/2) on q0 q1 |
//! | 2     | 2         | S on q1           |
//! | 2     | 3         | RX(π/2) on q1     |
//! | 2     | 4         | diag(1, i, i, 1)  |
//!
//! Everything else is composed from these with S·RX(π/2)·S = H.

use serde::{Deserialize, Serialize};

/// Braid generator indices, applied first to last
pub type BraidWord = Vec<usize>;

/// Widest register whose Clifford group braiding reaches
pub const MAX_LOWERING_WIDTH: usize = 2;

/// Anyons needed to encode `width` qubits
pub const fn anyons_for(width: usize) -> usize {
    2 * width + 2
}

/// A lowered circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraidProgram {
    /// Logical qubits of the register the braids act on
    pub width: usize,
    pub braids: BraidWord,
    /// Number of gates lowered into `braids`
    pub gate_count: usize,
}

impl BraidProgram {
    pub fn num_anyons(&self) -> usize {
        anyons_for(self.width)
    }

    pub fn len(&self) -> usize {
        self.braids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.braids.is_empty()
    }
}

/// Accumulates a braid word for a register of fixed width
///
/// Callers guarantee `width` is 1 or 2 and qubit indices are below it.
pub(crate) struct WordBuilder {
    width: usize,
    word: BraidWord,
}

impl WordBuilder {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            word: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> BraidWord {
        self.word
    }

    pub(crate) fn s(&mut self, qubit: usize) -> &mut Self {
        self.word.push(2 * qubit);
        self
    }

    /// S applied `k` times (k taken mod 4)
    pub(crate) fn s_pow(&mut self, qubit: usize, k: u8) -> &mut Self {
        for _ in 0..(k % 4) {
            self.s(qubit);
        }
        self
    }

    /// RX(π/2)
    pub(crate) fn rx(&mut self, qubit: usize) -> &mut Self {
        match (self.width, qubit) {
            (1, _) => self.word.push(1),
            (_, 1) => self.word.push(3),
            _ => {
                // RXX(π/2) conjugated by CNOT(0 -> 1) is RX(π/2) on q0
                self.cnot(0, 1);
                self.word.push(1);
                self.cnot(0, 1);
            }
        }
        self
    }

    pub(crate) fn rx_pow(&mut self, qubit: usize, k: u8) -> &mut Self {
        for _ in 0..(k % 4) {
            self.rx(qubit);
        }
        self
    }

    pub(crate) fn h(&mut self, qubit: usize) -> &mut Self {
        self.s(qubit).rx(qubit).s(qubit)
    }

    /// diag(1, i, i, 1) · S†(q0) · S†(q1)
    pub(crate) fn cz(&mut self) -> &mut Self {
        self.word.push(4);
        self.s_pow(0, 3).s_pow(1, 3)
    }

    pub(crate) fn cnot(&mut self, control: usize, target: usize) -> &mut Self {
        debug_assert_ne!(control, target);
        self.h(target).cz().h(target)
    }

    pub(crate) fn swap(&mut self) -> &mut Self {
        self.cnot(0, 1).cnot(1, 0).cnot(0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(width: usize, f: impl FnOnce(&mut WordBuilder)) -> BraidWord {
        let mut builder = WordBuilder::new(width);
        f(&mut builder);
        builder.finish()
    }

    #[test]
    fn test_anyons_for() {
        assert_eq!(anyons_for(1), 4);
        assert_eq!(anyons_for(2), 6);
    }

    #[test]
    fn test_single_qubit_words() {
        assert_eq!(word(1, |b| {
            b.h(0);
        }), vec![0, 1, 0]);
        assert_eq!(word(2, |b| {
            b.h(1);
        }), vec![2, 3, 2]);
        assert_eq!(word(2, |b| {
            b.s_pow(0, 7);
        }), vec![0, 0, 0]);
    }

    #[test]
    fn test_cz_word() {
        assert_eq!(word(2, |b| {
            b.cz();
        }), vec![4, 0, 0, 0, 2, 2, 2]);
    }

    #[test]
    fn test_generators_stay_in_range() {
        let w = word(2, |b| {
            b.swap().rx(0).h(0);
        });
        assert!(w.iter().all(|&g| g < anyons_for(2) - 1));

        let w = word(1, |b| {
            b.h(0).rx_pow(0, 3).s(0);
        });
        assert!(w.iter().all(|&g| g < anyons_for(1) - 1));
    }
}
