//! # Noise Sweep
//!
//! Sweeps the depolarizing probability on the Bell pair and reports how far
//! each mitigated distribution drifts from the noiseless one.
//!
//! Expected shape: the correlated mass P(00) + P(11) falls from 1 towards
//! 0.5 as p → 1, where every outcome is equally likely.
//!
//! Run: `cargo run -p noise-mitigation-sim --example noise_sweep`

use noise_mitigation_sim::prelude::*;

fn main() -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║     Bell Pair under Depolarizing Noise                   ║");
    println!("║     H(q0) · CX(q0,q1) · measure, naive mitigation        ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let base = ExperimentConfig::reference().with_shots(8192);
    let rates: Vec<f64> = (0..=10).map(|i| i as f64 * 0.1).collect();
    let results = noise_sweep(&base, &rates)?;
    let ideal = &results[0].mitigated;

    let states: Vec<Outcome> = ["00", "01", "10", "11"]
        .iter()
        .map(|s| s.parse())
        .collect::<Result<_>>()?;

    print!("  {:>5}", "p");
    for s in &states {
        print!("  {:>7}", format!("P({})", s));
    }
    println!("  {:>9}  {:>8}", "P(corr)", "TVD");
    println!("  {:─>5}{}  {:─>9}  {:─>8}", "", "  ───────".repeat(states.len()), "", "");

    for r in &results {
        let dist = &r.mitigated;
        print!("  {:>5.2}", r.config.error_probability);
        for s in &states {
            print!("  {:>7.4}", dist.probability(s));
        }
        let correlated = dist.probability(&states[0]) + dist.probability(&states[3]);
        println!(
            "  {:>9.4}  {:>8.4}",
            correlated,
            dist.total_variation_distance(ideal)
        );
    }

    println!();
    println!("Reference run (p = 0.05, 1024 shots):");
    let reference = execute(&ExperimentConfig::reference())?;
    println!("  counts:    {}", reference.counts);
    println!("  mitigated: {}", reference.mitigated);

    Ok(())
}
