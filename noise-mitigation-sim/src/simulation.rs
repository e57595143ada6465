//! Stochastic shot simulator.
//!
//! Each shot:
//! 1. Start every qubit in |0⟩
//! 2. For each gate, in order:
//!    a. Apply its ideal effect to the [`Register`]
//!    b. Sample the gate's error channel; on fire, depolarize every qubit it touched
//! 3. Measure the full register
//!
//! All validation happens before the first shot, so an invalid shot count
//! or mismatched channel never leaves partial results behind.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::circuit::Circuit;
use crate::error::{Result, SimError};
use crate::noise::NoiseModel;
use crate::outcome::{Outcome, OutcomeCounts};
use crate::register::{check_supported, Register};

/// Stride between per-shot seeds derived from a base seed.
const SEED_STRIDE: u64 = 7919;

/// Run `shots` independent shots drawing from one shared RNG.
///
/// Fails with `InvalidShotCount` for `shots <= 0`, `MissingMeasurement` if
/// the circuit never declared measure-all, `ArityMismatch` if a gate's
/// arity disagrees with its registered channel, and `UnsupportedCircuit` if
/// the gate sequence needs interference the register cannot track.
pub fn run<R: Rng>(
    circuit: &Circuit,
    noise: &NoiseModel,
    shots: i64,
    rng: &mut R,
) -> Result<Vec<Outcome>> {
    let shots = validate(circuit, noise, shots)?;
    debug!(
        "running {} shots of a {}-qubit, {}-gate circuit",
        shots,
        circuit.num_qubits(),
        circuit.len()
    );
    (0..shots).map(|_| run_shot(circuit, noise, rng)).collect()
}

/// Run `shots` shots, each with its own RNG seeded from `seed` and the shot
/// index. The result does not depend on thread count.
pub fn run_seeded(
    circuit: &Circuit,
    noise: &NoiseModel,
    shots: i64,
    seed: u64,
) -> Result<Vec<Outcome>> {
    let shots = validate(circuit, noise, shots)?;
    debug!(
        "running {} seeded shots (base seed {}) of a {}-gate circuit",
        shots,
        seed,
        circuit.len()
    );

    #[cfg(feature = "parallel")]
    let outcomes = (0..shots)
        .into_par_iter()
        .map(|shot| seeded_shot(circuit, noise, seed, shot))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes = (0..shots)
        .map(|shot| seeded_shot(circuit, noise, seed, shot))
        .collect();

    outcomes
}

/// Same shots as [`run_seeded`], tallied directly into a count table.
///
/// With the `parallel` feature each worker fills its own partial table and
/// the partials are summed at the end.
pub fn sample_counts(
    circuit: &Circuit,
    noise: &NoiseModel,
    shots: i64,
    seed: u64,
) -> Result<OutcomeCounts> {
    let shots = validate(circuit, noise, shots)?;
    debug!(
        "tallying {} seeded shots (base seed {}) of a {}-gate circuit",
        shots,
        seed,
        circuit.len()
    );

    #[cfg(feature = "parallel")]
    let counts = (0..shots)
        .into_par_iter()
        .map(|shot| seeded_shot(circuit, noise, seed, shot))
        .try_fold(OutcomeCounts::new, |mut partial, outcome| {
            partial.record(outcome?);
            Ok::<_, SimError>(partial)
        })
        .try_reduce(OutcomeCounts::new, |mut total, partial| {
            total.merge(partial);
            Ok(total)
        });
    #[cfg(not(feature = "parallel"))]
    let counts = (0..shots)
        .map(|shot| seeded_shot(circuit, noise, seed, shot))
        .collect();

    counts
}

/// Check every precondition of a run and return the shot count as `usize`.
pub fn validate(circuit: &Circuit, noise: &NoiseModel, shots: i64) -> Result<usize> {
    if shots <= 0 {
        return Err(SimError::InvalidShotCount(shots));
    }
    let shots = usize::try_from(shots).map_err(|_| SimError::InvalidShotCount(shots))?;
    if !circuit.measures_all() {
        return Err(SimError::MissingMeasurement);
    }
    for gate in circuit.gates() {
        noise.check_arity(gate.name(), gate.arity())?;
    }
    check_supported(circuit)?;
    Ok(shots)
}

fn shot_seed(seed: u64, shot: usize) -> u64 {
    seed.wrapping_add((shot as u64).wrapping_mul(SEED_STRIDE))
}

fn seeded_shot(circuit: &Circuit, noise: &NoiseModel, seed: u64, shot: usize) -> Result<Outcome> {
    let mut rng = StdRng::seed_from_u64(shot_seed(seed, shot));
    run_shot(circuit, noise, &mut rng)
}

/// Execute one shot of an already validated circuit.
fn run_shot<R: Rng + ?Sized>(circuit: &Circuit, noise: &NoiseModel, rng: &mut R) -> Result<Outcome> {
    let mut register = Register::new(circuit.num_qubits());
    for gate in circuit.gates() {
        register.apply(gate, rng);
        if noise.sample_error(gate.name(), gate.arity(), rng)? {
            trace!("depolarizing error after '{}' on {:?}", gate.name(), gate.qubits());
            for qubit in gate.qubits() {
                register.depolarize(qubit, rng);
            }
        }
    }
    Ok(register.measure_all(rng))
}
