//! Command-line batch runner
//!
//! Loads an arena configuration from a JSON file, executes a batch of
//! independent runs, and writes the results (including cross-run per-day
//! averages) as JSON for the external analysis and plotting tooling.
//!
//! ```text
//! slot-exchange config.json --runs 50 --output results.json
//! ```

use clap::Parser;
use slot_exchange_core_rs::{run_batch, ArenaConfig};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Run a batch of slot exchange simulations from a JSON config
#[derive(Debug, Parser)]
#[command(name = "slot-exchange", version, about)]
struct Cli {
    /// Path to the arena configuration (JSON form of ArenaConfig)
    config: PathBuf,

    /// Number of independent runs (seeded base_seed, base_seed + 1, ...)
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Where to write the batch results as JSON (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.config)?;
    let config: ArenaConfig = serde_json::from_str(&raw)?;

    let batch = run_batch(&config, cli.runs)?;

    let json = serde_json::to_string_pretty(&batch)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("Results written to {}", path.display());
        }
        None => println!("{}", json),
    }

    for day in &batch.day_averages {
        eprintln!(
            "day {:>3}  baseline {:.4}  optimum {:.4}",
            day.day, day.random_baseline_satisfaction, day.optimum_bound_satisfaction
        );
    }

    Ok(())
}
