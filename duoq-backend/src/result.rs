//! Measurement shot results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcomes of repeated full-register measurements
///
/// Every shot holds one bit per qubit, qubit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotResults {
    pub num_qubits: usize,
    pub shots: Vec<Vec<u8>>,
}

impl ShotResults {
    pub fn new(num_qubits: usize, shots: Vec<Vec<u8>>) -> Self {
        Self { num_qubits, shots }
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Measurement counts: bitstring -> count
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for shot in &self.shots {
            *counts.entry(bitstring(shot)).or_insert(0) += 1;
        }
        counts
    }

    /// Get the count for a specific bitstring
    pub fn get_count(&self, bitstring: &str) -> usize {
        self.counts().get(bitstring).copied().unwrap_or(0)
    }

    /// Most frequent bitstring, the smallest one on ties
    pub fn most_frequent(&self) -> Option<(String, usize)> {
        self.counts()
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
    }

    /// Counts normalized by the number of shots
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.len() as f64;
        self.counts()
            .into_iter()
            .map(|(bits, count)| (bits, count as f64 / total))
            .collect()
    }

    /// Fraction of shots in which `qubit` read 1
    pub fn qubit_frequency(&self, qubit: usize) -> Option<f64> {
        if qubit >= self.num_qubits || self.is_empty() {
            return None;
        }
        let ones = self.shots.iter().filter(|shot| shot[qubit] == 1).count();
        Some(ones as f64 / self.len() as f64)
    }
}

fn bitstring(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn results() -> ShotResults {
        ShotResults::new(
            2,
            vec![vec![0, 0], vec![1, 1], vec![1, 1], vec![1, 0]],
        )
    }

    #[test]
    fn test_counts_print_qubit_zero_first() {
        let counts = results().counts();
        assert_eq!(counts.get("00"), Some(&1));
        assert_eq!(counts.get("11"), Some(&2));
        assert_eq!(counts.get("10"), Some(&1));
        assert_eq!(counts.get("01"), None);
        assert_eq!(results().get_count("01"), 0);
    }

    #[test]
    fn test_most_frequent() {
        assert_eq!(results().most_frequent(), Some(("11".to_string(), 2)));

        let tied = ShotResults::new(1, vec![vec![1], vec![0]]);
        assert_eq!(tied.most_frequent(), Some(("0".to_string(), 1)));
        assert_eq!(ShotResults::new(1, vec![]).most_frequent(), None);
    }

    #[test]
    fn test_probabilities_and_frequencies() {
        let results = results();
        let probs = results.probabilities();
        assert_relative_eq!(probs["11"], 0.5);
        assert_relative_eq!(probs.values().sum::<f64>(), 1.0);

        assert_relative_eq!(results.qubit_frequency(0).unwrap(), 0.75);
        assert_relative_eq!(results.qubit_frequency(1).unwrap(), 0.5);
        assert_eq!(results.qubit_frequency(2), None);
    }
}
