//! `noise-mitigation-sim` binary: run the noisy Bell-pair experiment and
//! print raw counts next to the mitigated distribution.
//!
//! ```bash
//! cargo run -p noise-mitigation-sim -- --shots 4096 --error-probability 0.1
//! RUST_LOG=debug cargo run -p noise-mitigation-sim
//! ```

use std::collections::BTreeSet;

use clap::Parser;
use log::{error, info};

use noise_mitigation_sim::experiment::{execute, ExperimentConfig, ExperimentResult, DEFAULT_SEED};
use noise_mitigation_sim::outcome::Outcome;

/// Width of a full-probability bar in the comparison chart.
const BAR_WIDTH: usize = 40;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "noise-mitigation-sim",
    version,
    about = "Noisy Bell-pair sampling with naive count mitigation",
    long_about = None
)]
struct Args {
    /// Number of qubits in the GHZ chain (2 = Bell pair).
    #[arg(long, default_value_t = 2)]
    qubits: usize,

    /// Number of shots. Must be positive.
    #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
    shots: i64,

    /// Depolarizing error probability applied after every H and CNOT.
    #[arg(short = 'p', long, default_value_t = 0.05, allow_negative_numbers = true)]
    error_probability: f64,

    /// Base RNG seed.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = ExperimentConfig {
        num_qubits: args.qubits,
        shots: args.shots,
        error_probability: args.error_probability,
        seed: args.seed,
    };

    let result = match execute(&config) {
        Ok(result) => result,
        Err(e) => {
            error!("experiment failed: {e}");
            std::process::exit(1);
        }
    };
    info!("experiment finished");

    report(&result);
}

fn report(result: &ExperimentResult) {
    let shots = result.counts.total() as f64;

    println!("Quantum Circuit:");
    println!("{}", result.circuit);
    println!();
    println!("Noisy Measurement Results: {}", result.counts);
    println!("Mitigated Results: {}", result.mitigated);
    println!();

    println!("━━━ Noisy vs Mitigated (p = {}, {} shots) ━━━", result.config.error_probability, shots);
    println!();

    let outcomes: BTreeSet<&Outcome> = result
        .counts
        .iter()
        .map(|(o, _)| o)
        .chain(result.mitigated.iter().map(|(o, _)| o))
        .collect();
    let label_width = outcomes.iter().map(|o| o.len()).max().unwrap_or(0).max(5);

    println!("  {:>w$}  {:<10} {:>8}", "State", "Series", "Prob", w = label_width);
    println!("  {:─>w$}  {:─<10} {:─>8}", "", "", "", w = label_width);
    for outcome in outcomes {
        let mitigated = result.mitigated.probability(outcome);
        let noisy = result.counts.get(outcome) as f64 / shots;
        println!(
            "  {:>w$}  {:<10} {:>8.4}  {}",
            outcome,
            "mitigated",
            mitigated,
            bar(mitigated, '█'),
            w = label_width
        );
        println!(
            "  {:>w$}  {:<10} {:>8.4}  {}",
            "",
            "noisy",
            noisy,
            bar(noisy, '░'),
            w = label_width
        );
    }
}

fn bar(probability: f64, fill: char) -> String {
    let len = (probability.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat(fill).take(len).collect()
}
