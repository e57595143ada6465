//! Per-gate depolarizing error channels.
//!
//! A [`NoiseModel`] maps gate names to an [`ErrorChannel`]. After every
//! application of a registered gate the simulator draws one Bernoulli trial
//! with the channel's probability; when it fires, each qubit the gate
//! touched is replaced by a fresh fair random bit, which is what a maximally
//! mixed qubit looks like when measured in the computational basis.

use std::collections::BTreeMap;

use rand::Rng;

use crate::circuit::Arity;
use crate::error::{Result, SimError};

/// Error channel attached to one gate name.
///
/// Only [`ErrorChannel::new`] builds one, so `probability` is always in
/// [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorChannel {
    probability: f64,
    arity: Arity,
}

impl ErrorChannel {
    /// Create a channel, validating that `probability` lies in [0, 1].
    pub fn new(arity: Arity, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SimError::InvalidProbability(probability));
        }
        Ok(Self { probability, arity })
    }

    /// Probability that an error fires after one gate application.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of qubits the channel depolarizes.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Draw one independent Bernoulli trial.
    pub fn fires<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.probability)
    }
}

/// Gate-name keyed collection of error channels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseModel {
    channels: BTreeMap<String, ErrorChannel>,
}

impl NoiseModel {
    /// A noiseless model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Depolarizing noise of strength `probability` on every Hadamard
    /// (1-qubit channel) and every CNOT (2-qubit channel).
    pub fn depolarizing(probability: f64) -> Result<Self> {
        let mut model = NoiseModel::new();
        model.register_error("h", Arity::One, probability)?;
        model.register_error("cx", Arity::Two, probability)?;
        Ok(model)
    }

    /// Register (or replace) the channel for `gate`.
    ///
    /// Fails with `InvalidProbability` outside [0, 1] and with
    /// `ArityMismatch` if `gate` already has a channel of another arity.
    pub fn register_error(&mut self, gate: &str, arity: Arity, probability: f64) -> Result<()> {
        let channel = ErrorChannel::new(arity, probability)?;
        if let Some(existing) = self.channels.get(gate) {
            if existing.arity() != arity {
                return Err(SimError::arity_mismatch(gate, existing.arity(), arity));
            }
        }
        self.channels.insert(gate.to_owned(), channel);
        Ok(())
    }

    pub fn channel(&self, gate: &str) -> Option<&ErrorChannel> {
        self.channels.get(gate)
    }

    /// Look up the channel for `gate`, failing if it was registered with a
    /// different arity than `arity`.
    pub fn check_arity(&self, gate: &str, arity: Arity) -> Result<Option<&ErrorChannel>> {
        match self.channels.get(gate) {
            Some(channel) if channel.arity() != arity => {
                Err(SimError::arity_mismatch(gate, channel.arity(), arity))
            }
            other => Ok(other),
        }
    }

    /// Whether an error fires for one application of `gate`.
    ///
    /// Unregistered gates never fire and consume no randomness.
    pub fn sample_error<R: Rng + ?Sized>(&self, gate: &str, arity: Arity, rng: &mut R) -> Result<bool> {
        Ok(self
            .check_arity(gate, arity)?
            .map_or(false, |channel| channel.fires(rng)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorChannel)> {
        self.channels.iter().map(|(name, ch)| (name.as_str(), ch))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_register_rejects_out_of_range_probability() {
        let mut model = NoiseModel::new();
        assert_eq!(
            model.register_error("h", Arity::One, 1.5),
            Err(SimError::InvalidProbability(1.5))
        );
        assert_eq!(
            model.register_error("h", Arity::One, -0.1),
            Err(SimError::InvalidProbability(-0.1))
        );
        assert!(model.register_error("h", Arity::One, f64::NAN).is_err());
        assert!(model.is_empty());
    }

    #[test]
    fn test_error_channel_only_built_valid() {
        assert_eq!(
            ErrorChannel::new(Arity::One, 2.0),
            Err(SimError::InvalidProbability(2.0))
        );
        assert!(ErrorChannel::new(Arity::One, f64::NAN).is_err());

        let channel = ErrorChannel::new(Arity::Two, 0.3).unwrap();
        assert_eq!(channel.probability(), 0.3);
        assert_eq!(channel.arity(), Arity::Two);
    }

    #[test]
    fn test_register_accepts_bounds() {
        let mut model = NoiseModel::new();
        model.register_error("h", Arity::One, 0.0).unwrap();
        model.register_error("cx", Arity::Two, 1.0).unwrap();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_reregistering_with_other_arity_fails() {
        let mut model = NoiseModel::new();
        model.register_error("cx", Arity::Two, 0.05).unwrap();
        assert_eq!(
            model.register_error("cx", Arity::One, 0.05),
            Err(SimError::arity_mismatch("cx", Arity::Two, Arity::One))
        );
        // Same arity replaces the probability.
        model.register_error("cx", Arity::Two, 0.2).unwrap();
        assert_eq!(model.channel("cx").unwrap().probability(), 0.2);
    }

    #[test]
    fn test_sample_error_unregistered_gate_never_fires() {
        let model = NoiseModel::depolarizing(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(!model.sample_error("x", Arity::One, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_sample_error_arity_mismatch() {
        let model = NoiseModel::depolarizing(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            model.sample_error("h", Arity::Two, &mut rng),
            Err(SimError::arity_mismatch("h", Arity::One, Arity::Two))
        );
    }

    #[test]
    fn test_sample_error_extremes() {
        let mut rng = StdRng::seed_from_u64(9);
        let never = NoiseModel::depolarizing(0.0).unwrap();
        let always = NoiseModel::depolarizing(1.0).unwrap();
        for _ in 0..200 {
            assert!(!never.sample_error("h", Arity::One, &mut rng).unwrap());
            assert!(always.sample_error("cx", Arity::Two, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_sample_error_rate_tracks_probability() {
        let model = NoiseModel::depolarizing(0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 100_000;
        let fired = (0..trials)
            .filter(|_| model.sample_error("h", Arity::One, &mut rng).unwrap())
            .count();
        let rate = fired as f64 / trials as f64;
        assert!(
            (rate - 0.05).abs() < 0.005,
            "Fire rate {} should be close to 0.05",
            rate
        );
    }

    #[test]
    fn test_depolarizing_registers_h_and_cx() {
        let model = NoiseModel::depolarizing(0.05).unwrap();
        let names: Vec<&str> = model.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["cx", "h"]);
        assert_eq!(model.channel("cx").unwrap().arity(), Arity::Two);
        assert_eq!(model.channel("h").unwrap().arity(), Arity::One);
        assert!(NoiseModel::depolarizing(2.0).is_err());
    }
}
