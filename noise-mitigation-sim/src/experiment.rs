//! End-to-end experiment: build the GHZ/Bell circuit, attach depolarizing
//! noise, sample, tally and mitigate.

use log::info;

use crate::circuit::Circuit;
use crate::error::Result;
use crate::mitigation::{mitigate, MitigatedDistribution};
use crate::noise::NoiseModel;
use crate::outcome::OutcomeCounts;
use crate::simulation::sample_counts;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for one noisy sampling experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Register size. Two qubits give the Bell pair.
    pub num_qubits: usize,
    /// Number of shots; must be positive.
    pub shots: i64,
    /// Depolarizing probability on every H and CNOT.
    pub error_probability: f64,
    /// Base seed for the per-shot RNG streams.
    pub seed: u64,
}

impl ExperimentConfig {
    /// Bell pair, 1024 shots, 5% depolarizing noise.
    pub fn reference() -> Self {
        Self {
            num_qubits: 2,
            shots: 1024,
            error_probability: 0.05,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_error_probability(mut self, error_probability: f64) -> Self {
        self.error_probability = error_probability;
        self
    }

    pub fn with_shots(mut self, shots: i64) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Output of one experiment: the raw table and its normalized form.
#[derive(Debug, Clone)]
pub struct ExperimentResult {
    pub config: ExperimentConfig,
    pub circuit: Circuit,
    pub counts: OutcomeCounts,
    pub mitigated: MitigatedDistribution,
}

/// Run one experiment.
///
/// The circuit, noise model and shot count are all validated before any
/// shot is simulated.
pub fn execute(config: &ExperimentConfig) -> Result<ExperimentResult> {
    let circuit = Circuit::ghz(config.num_qubits)?;
    let noise = NoiseModel::depolarizing(config.error_probability)?;
    info!(
        "sampling {} shots on {} qubits with p = {}",
        config.shots, config.num_qubits, config.error_probability
    );

    let counts = sample_counts(&circuit, &noise, config.shots, config.seed)?;
    let mitigated = mitigate(&counts)?;
    info!("observed {} distinct outcomes", counts.len());

    Ok(ExperimentResult {
        config: config.clone(),
        circuit,
        counts,
        mitigated,
    })
}

/// Run `base` once per error probability, keeping everything else fixed.
pub fn noise_sweep(base: &ExperimentConfig, probabilities: &[f64]) -> Result<Vec<ExperimentResult>> {
    probabilities
        .iter()
        .map(|&p| execute(&base.clone().with_error_probability(p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::outcome::Outcome;

    #[test]
    fn test_reference_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.num_qubits, 2);
        assert_eq!(config.shots, 1024);
        assert_eq!(config.error_probability, 0.05);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_execute_reference() {
        let result = execute(&ExperimentConfig::reference()).unwrap();
        assert_eq!(result.counts.total(), 1024);
        assert_eq!(result.circuit, Circuit::bell_pair());
        assert!((result.mitigated.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_execute_rejects_bad_probability_and_shots() {
        let bad_p = ExperimentConfig::reference().with_error_probability(1.2);
        assert!(matches!(execute(&bad_p), Err(SimError::InvalidProbability(_))));

        let bad_shots = ExperimentConfig::reference().with_shots(0);
        assert_eq!(execute(&bad_shots).unwrap_err(), SimError::InvalidShotCount(0));
    }

    #[test]
    fn test_execute_three_qubit_ghz() {
        let config = ExperimentConfig {
            num_qubits: 3,
            error_probability: 0.0,
            ..ExperimentConfig::reference()
        };
        let result = execute(&config).unwrap();
        let all_zero: Outcome = "000".parse().unwrap();
        let all_one: Outcome = "111".parse().unwrap();
        assert_eq!(
            result.counts.get(&all_zero) + result.counts.get(&all_one),
            1024
        );
    }

    #[test]
    fn test_noise_sweep_degrades_correlation() {
        let base = ExperimentConfig::reference().with_shots(4000);
        let results = noise_sweep(&base, &[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(results.len(), 3);

        let ideal = &results[0].mitigated;
        let tvd: Vec<f64> = results
            .iter()
            .map(|r| r.mitigated.total_variation_distance(ideal))
            .collect();
        assert_eq!(tvd[0], 0.0);
        assert!(
            tvd[1] < tvd[2],
            "Distance from ideal should grow with noise: {:?}",
            tvd
        );
    }
}
