//! Measured bitstrings and the outcome count table.
//!
//! Bitstrings render with the highest-index qubit on the left and q0 on the
//! right, so a 2-qubit outcome with only q0 set prints as `01`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::SimError;

/// One shot's measured bits, indexed by qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outcome {
    bits: SmallVec<[bool; 8]>,
}

impl Outcome {
    /// Build from per-qubit bits, q0 first.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        bits.into_iter().collect()
    }

    /// Measured value of `qubit`, if the outcome covers it.
    pub fn bit(&self, qubit: usize) -> Option<bool> {
        self.bits.get(qubit).copied()
    }

    /// Per-qubit bits, q0 first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl FromIterator<bool> for Outcome {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Orders outcomes the way they print: shorter first, then lexicographic
/// on the rendered text.
impl Ord for Outcome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits
            .len()
            .cmp(&other.bits.len())
            .then_with(|| self.bits.iter().rev().cmp(other.bits.iter().rev()))
    }
}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self
            .bits
            .iter()
            .rev()
            .map(|&b| if b { '1' } else { '0' })
            .collect();
        f.pad(&text)
    }
}

impl FromStr for Outcome {
    type Err = SimError;

    /// Parse the rendered form, e.g. `"01"` is q0 = 1, q1 = 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .rev()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(SimError::InvalidBitstring(s.to_owned())),
            })
            .collect()
    }
}

/// Occurrence count per observed outcome. Only outcomes seen at least once
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    counts: BTreeMap<Outcome, u64>,
}

impl OutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Fold another partial table into this one by summing counts.
    pub fn merge(&mut self, other: OutcomeCounts) {
        for (outcome, count) in other.counts {
            *self.counts.entry(outcome).or_insert(0) += count;
        }
    }

    /// Count for `outcome` (zero if never observed).
    pub fn get(&self, outcome: &Outcome) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, u64)> {
        self.counts.iter().map(|(outcome, &count)| (outcome, count))
    }
}

impl FromIterator<Outcome> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut counts = OutcomeCounts::new();
        counts.extend(iter);
        counts
    }
}

impl Extend<Outcome> for OutcomeCounts {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.record(outcome);
        }
    }
}

impl fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (outcome, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", outcome, count)?;
        }
        write!(f, "}}")
    }
}

/// Tally per-shot outcomes into a count table.
pub fn tally(outcomes: &[Outcome]) -> OutcomeCounts {
    outcomes.iter().cloned().collect()
}
