//! Run projections for every scenario in a CSV file
//!
//! Outputs one summary row per scenario for side-by-side comparison

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use solar_roi::parameters::load_scenarios;
use solar_roi::report::{format_currency, write_summary_csv};
use solar_roi::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project every scenario in a CSV file")]
struct Args {
    /// Scenario CSV (header: scenario plus camelCase parameter names)
    #[arg(default_value = "data/scenarios.csv")]
    input: PathBuf,

    /// Summary output path
    #[arg(short, long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());

    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("Failed to load scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();

    // Run projections in parallel
    let runner = ScenarioRunner::new();
    let outcomes = runner.run_batch(&scenarios);

    println!("Projections complete in {:?}", proj_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_summary_csv(file, &outcomes)?;
    println!("Output written to {}", args.output.display());

    // Print summary stats
    let succeeded: Vec<_> = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok().map(|r| (o.name.as_str(), &r.summary)))
        .collect();
    let failed = outcomes.len() - succeeded.len();

    println!("\nBatch Summary:");
    println!("  Scenarios: {} ok, {} failed", succeeded.len(), failed);

    let best = succeeded
        .iter()
        .max_by(|a, b| a.1.total_net_savings.total_cmp(&b.1.total_net_savings));
    if let Some((name, summary)) = best {
        println!(
            "  Highest net savings: {} ({}, ROI {:.1}%)",
            name,
            format_currency(summary.total_net_savings),
            summary.roi
        );
    }

    let fastest = succeeded
        .iter()
        .filter_map(|(name, s)| s.payback_period.map(|p| (name, p)))
        .min_by_key(|(_, p)| *p);
    if let Some((name, payback)) = fastest {
        println!("  Fastest payback:     {} ({} years)", name, payback);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
