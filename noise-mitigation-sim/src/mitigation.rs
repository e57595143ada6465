//! Naive count mitigation: rescale raw counts by the total number of shots.
//!
//! This converts frequencies into a probability mass function and nothing
//! more. No inverse noise model is applied.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SimError};
use crate::outcome::{Outcome, OutcomeCounts};

/// Probability per observed outcome. Values sum to 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MitigatedDistribution {
    probabilities: BTreeMap<Outcome, f64>,
}

impl MitigatedDistribution {
    /// Probability of `outcome` (zero if it was never observed).
    pub fn probability(&self, outcome: &Outcome) -> f64 {
        self.probabilities.get(outcome).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, f64)> {
        self.probabilities.iter().map(|(outcome, &p)| (outcome, p))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities (1 up to rounding).
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Total variation distance ½·Σ|p − q| over the union of outcomes.
    pub fn total_variation_distance(&self, other: &MitigatedDistribution) -> f64 {
        let mut sum: f64 = self
            .probabilities
            .iter()
            .map(|(outcome, &p)| (p - other.probability(outcome)).abs())
            .sum();
        sum += other
            .probabilities
            .iter()
            .filter(|(outcome, _)| !self.probabilities.contains_key(*outcome))
            .map(|(_, &q)| q)
            .sum::<f64>();
        sum / 2.0
    }
}

impl fmt::Display for MitigatedDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (outcome, p)) in self.probabilities.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", outcome, p)?;
        }
        write!(f, "}}")
    }
}

/// Divide every count by the total count.
///
/// Fails with `EmptyDistribution` when the table holds no counts.
pub fn mitigate(counts: &OutcomeCounts) -> Result<MitigatedDistribution> {
    let total = counts.total();
    if total == 0 {
        return Err(SimError::EmptyDistribution);
    }
    let total = total as f64;
    let probabilities = counts
        .iter()
        .map(|(outcome, count)| (outcome.clone(), count as f64 / total))
        .collect();
    Ok(MitigatedDistribution { probabilities })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::tally;
    use approx::assert_relative_eq;

    fn o(s: &str) -> Outcome {
        s.parse().unwrap()
    }

    #[test]
    fn test_mitigate_empty_fails() {
        assert_eq!(
            mitigate(&OutcomeCounts::new()),
            Err(SimError::EmptyDistribution)
        );
    }

    #[test]
    fn test_mitigate_divides_by_total() {
        let mut outcomes = vec![o("00"); 510];
        outcomes.extend(vec![o("11"); 490]);
        outcomes.extend(vec![o("01"); 24]);
        let dist = mitigate(&tally(&outcomes)).unwrap();
        assert_relative_eq!(dist.probability(&o("00")), 510.0 / 1024.0);
        assert_relative_eq!(dist.probability(&o("11")), 490.0 / 1024.0);
        assert_relative_eq!(dist.probability(&o("01")), 24.0 / 1024.0);
        assert_eq!(dist.probability(&o("10")), 0.0);
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn test_mitigated_sums_to_one() {
        let outcomes: Vec<Outcome> = (0..997u32)
            .map(|i| Outcome::from_bits([i % 3 == 0, i % 7 == 0]))
            .collect();
        let dist = mitigate(&tally(&outcomes)).unwrap();
        assert!((dist.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_outcome_is_certain() {
        let dist = mitigate(&tally(&[o("11"), o("11")])).unwrap();
        assert_eq!(dist.probability(&o("11")), 1.0);
    }

    #[test]
    fn test_total_variation_distance() {
        let a = mitigate(&tally(&[o("00"), o("11")])).unwrap();
        let b = mitigate(&tally(&[o("00"), o("01")])).unwrap();
        assert_relative_eq!(a.total_variation_distance(&a), 0.0);
        assert_relative_eq!(a.total_variation_distance(&b), 0.5);
        assert_relative_eq!(b.total_variation_distance(&a), 0.5);
    }
}
