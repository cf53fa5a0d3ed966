// src/simulation/results.rs
use crate::core::{ClbitId, TeleportError, TeleportResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome frequencies over all shots of one execution.
///
/// Keys are bit strings with one character per classical bit. The leftmost
/// character is the highest-index classical bit and the rightmost is
/// `ClbitId(0)`; see [`format_outcome`] and [`outcome_bit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: BTreeMap<String, u64>,
}

impl Histogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `outcome`.
    pub fn record(&mut self, outcome: impl Into<String>) {
        self.add(outcome, 1);
    }

    /// Adds `count` occurrences of `outcome`. Saturates at `u64::MAX`.
    pub fn add(&mut self, outcome: impl Into<String>, count: u64) {
        let slot = self.counts.entry(outcome.into()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Occurrences of `outcome` (0 when never observed).
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |acc, &c| acc.saturating_add(c))
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.values().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(outcome, count)` in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Per-key integer sum of `other` into `self`. Order of merging is irrelevant.
    pub fn merge(&mut self, other: &Histogram) {
        for (outcome, count) in other.iter() {
            self.add(outcome, count);
        }
    }

    /// Checks mass conservation and key well-formedness.
    ///
    /// # Errors
    /// * `MalformedOutcome` if a key is not `width` characters of '0'/'1'.
    /// * `ShotCountMismatch` if the counts do not sum to `expected_shots`,
    ///   including a sum that overflows (reported as `u64::MAX`).
    pub fn validate(&self, width: usize, expected_shots: u64) -> TeleportResult<()> {
        for key in self.counts.keys() {
            check_outcome(key, width)?;
        }
        match self.checked_total() {
            Some(actual) if actual == expected_shots => Ok(()),
            Some(actual) => Err(TeleportError::ShotCountMismatch { expected: expected_shots, actual }),
            None => Err(TeleportError::ShotCountMismatch { expected: expected_shots, actual: u64::MAX }),
        }
    }
}

impl FromIterator<(String, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut histogram = Histogram::new();
        for (outcome, count) in iter {
            histogram.add(outcome, count);
        }
        histogram
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram ({} shots):", self.total())?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        }
        for (outcome, count) in &self.counts {
            writeln!(f, "  {}: {}", outcome, count)?;
        }
        Ok(())
    }
}

/// Renders committed classical bits (indexed by `ClbitId`) as an outcome key.
pub fn format_outcome(bits: &[bool]) -> String {
    bits.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Reads the value of `clbit` from an outcome key.
///
/// # Errors
/// `MalformedOutcome` if the key is too short for `clbit` or the character is
/// not '0' or '1'.
pub fn outcome_bit(key: &str, clbit: ClbitId) -> TeleportResult<bool> {
    let malformed = || TeleportError::MalformedOutcome {
        key: key.to_string(),
        expected_len: clbit.index() + 1,
    };
    let width = key.len();
    if clbit.index() >= width {
        return Err(malformed());
    }
    match key.as_bytes()[width - 1 - clbit.index()] {
        b'0' => Ok(false),
        b'1' => Ok(true),
        _ => Err(malformed()),
    }
}

/// Checks that `key` is exactly `width` characters of '0' or '1'.
pub(crate) fn check_outcome(key: &str, width: usize) -> TeleportResult<()> {
    if key.len() != width || !key.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(TeleportError::MalformedOutcome {
            key: key.to_string(),
            expected_len: width,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflowing_counts_fail_validation() {
        let mut histogram = Histogram::new();
        histogram.add("100", u64::MAX);
        histogram.add("000", 1001);
        assert_eq!(histogram.checked_total(), None);
        assert_eq!(histogram.total(), u64::MAX);
        assert!(matches!(
            histogram.validate(3, 1000),
            Err(TeleportError::ShotCountMismatch { expected: 1000, actual: u64::MAX })
        ));
    }

    #[test]
    fn test_add_saturates() {
        let mut histogram = Histogram::new();
        histogram.add("1", u64::MAX);
        histogram.add("1", 5);
        assert_eq!(histogram.get("1"), u64::MAX);
        assert_eq!(histogram.checked_total(), Some(u64::MAX));
    }
}
