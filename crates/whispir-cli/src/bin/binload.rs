use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use whispir_cli::init_tracing;
use whispir_sim::{CheckpointWriter, DEFAULT_RUNS, Scheme, SimConfig, Simulation};

#[derive(Parser)]
#[command(
    name = "binload",
    about = "Estimate worst-case PIR bucket loads by repeated random throws"
)]
struct Cli {
    /// PIR scheme to compute bins for: rlwe or paillier
    scheme: String,

    /// Number of independent trials
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: u64,

    /// Base seed for reproducible trials
    #[arg(long)]
    seed: Option<u64>,

    /// Checkpoint CSV path (default: simulation-<scheme>.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose debug output
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scheme: Scheme = cli.scheme.parse()?;
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(scheme.checkpoint_file()));

    let config = SimConfig {
        runs: cli.runs,
        seed: cli.seed,
        threads: cli.threads,
        ..SimConfig::new(scheme)
    };
    let sim = Simulation::new(config, Some(CheckpointWriter::new(&output)))
        .context("invalid simulation config")?;
    let answers = sim
        .run()
        .with_context(|| format!("simulation failed (checkpoints in {})", output.display()))?;

    for (balls, max_load) in sim.config().ball_counts.iter().zip(&answers) {
        println!("bins={} balls={balls} max_load={max_load}", scheme.bins());
    }
    println!("done. runs={}, checkpoints in {}", sim.completed(), output.display());
    Ok(())
}
