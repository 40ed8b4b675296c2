use anyhow::{Context, Result};
use clap::Parser;
use whispir_cli::init_tracing;
use whispir_cli::report::{StdoutObserver, best_line, stats_line, witness_lines};
use whispir_core::{
    DEFAULT_LOG_N, RingGroup, SearchConfig, SearchOutcome, search_pairs, search_triples,
};

const USAGE: &str = "Usage: whispir [2|3]";

#[derive(Parser)]
#[command(
    name = "whispir",
    about = "Search for cheap automorphism generators of the power-of-two slot rotations"
)]
struct Cli {
    /// Search variant: 2 (generator pairs) or 3 (generator triples)
    mode: Option<String>,

    /// log2 of the ring size N
    #[arg(long, default_value_t = DEFAULT_LOG_N)]
    log_n: u32,

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

    let config = SearchConfig {
        log_n: cli.log_n,
        threads: cli.threads,
    };

    match cli.mode.as_deref() {
        Some("2") => cmd_pairs(&config),
        Some("3") => cmd_triples(&config),
        Some(other) => {
            tracing::warn!("unknown search mode '{other}'");
            println!("{USAGE}");
            Ok(())
        }
        None => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

fn cmd_pairs(config: &SearchConfig) -> Result<()> {
    let group = RingGroup::new(config.log_n).context("invalid ring size")?;
    let outcome =
        search_pairs(config, &StdoutObserver::pairs()).context("pair search failed")?;
    print_outcome(&group, &outcome);
    Ok(())
}

fn cmd_triples(config: &SearchConfig) -> Result<()> {
    let group = RingGroup::new(config.log_n).context("invalid ring size")?;
    let outcome =
        search_triples(config, &StdoutObserver::triples()).context("triple search failed")?;
    print_outcome(&group, &outcome);
    Ok(())
}

fn print_outcome<const K: usize>(group: &RingGroup, outcome: &SearchOutcome<K>) {
    println!("{}", stats_line(&outcome.stats));
    match &outcome.best {
        Some(best) => {
            println!("final: {}", best_line(best.score, &best.generators));
            for line in witness_lines(group, best) {
                println!("{line}");
            }
        }
        None => println!("no generator set reaches every required rotation"),
    }
}
