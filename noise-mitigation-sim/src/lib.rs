//! # noise-mitigation-sim
//!
//! Stochastic simulation of a small quantum circuit under gate-level
//! depolarizing noise, followed by naive count mitigation.
//!
//! ## Pipeline
//!
//! ```text
//! Circuit ──► simulation (per-shot Register + NoiseModel) ──► Outcome per shot
//!    ──► tally ──► OutcomeCounts ──► mitigate ──► MitigatedDistribution
//! ```
//!
//! The reference scenario is a Bell pair (H on q0, CNOT q0→q1) sampled for
//! 1024 shots with a 5% depolarizing channel on both gates. Without noise
//! only `00` and `11` appear; noise leaks probability into `01` and `10`.
//!
//! "Mitigation" here is a plain rescale of counts by the shot total. It
//! turns frequencies into probabilities and applies no noise inversion.
//!
//! ## Usage
//!
//! ```no_run
//! use noise_mitigation_sim::prelude::*;
//!
//! let result = execute(&ExperimentConfig::reference()).unwrap();
//! println!("{}", result.circuit);
//! println!("Noisy counts: {}", result.counts);
//! println!("Mitigated:    {}", result.mitigated);
//! ```

pub mod circuit;
pub mod error;
pub mod experiment;
pub mod mitigation;
pub mod noise;
pub mod outcome;
pub mod register;
pub mod simulation;

pub mod prelude {
    pub use crate::circuit::*;
    pub use crate::error::*;
    pub use crate::experiment::*;
    pub use crate::mitigation::*;
    pub use crate::noise::*;
    pub use crate::outcome::*;
    pub use crate::simulation::*;
}
