//! Execution results and measurement counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measurement counts: bitstring → number of shots observing it.
///
/// Bitstrings are little-endian (character 0 is qubit 0).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty counts table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate over (bitstring, count) pairs in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by_key(|&(_, &count)| count)
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Probability of a bitstring (count / total).
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / total as f64
        }
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Result of executing a circuit on a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 1);
        counts.insert("00", 1);
        counts.insert("11", 3);

        assert_eq!(counts.get("00"), 2);
        assert_eq!(counts.get("11"), 3);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent() {
        let counts: Counts = [("00".to_string(), 40u64), ("11".to_string(), 60u64)]
            .into_iter()
            .collect();
        assert_eq!(counts.most_frequent(), Some(("11", 60)));
    }

    #[test]
    fn test_probability() {
        let counts: Counts = [("0".to_string(), 25u64), ("1".to_string(), 75u64)]
            .into_iter()
            .collect();
        assert!((counts.probability("1") - 0.75).abs() < f64::EPSILON);
        assert!((Counts::new().probability("0") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_execution_result() {
        let mut counts = Counts::new();
        counts.insert("00", 100);
        let result = ExecutionResult::new(counts, 100).with_execution_time(12);

        assert_eq!(result.shots, 100);
        assert_eq!(result.execution_time_ms, Some(12));
    }
}
