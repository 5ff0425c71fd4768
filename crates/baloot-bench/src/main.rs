use std::path::PathBuf;

use clap::Parser;

use baloot_bench::config::{BenchmarkConfig, ResolvedOutputs};
use baloot_bench::logging::init_logging;
use baloot_bench::tournament::TournamentRunner;

/// Tournament benchmarking harness for the Baloot bot.
#[derive(Debug, Parser)]
#[command(
    name = "baloot-bench",
    author,
    version,
    about = "Deterministic Baloot bot tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of simulated rounds played per agent matchup.
    #[arg(long, value_name = "ROUNDS")]
    rounds_per_matchup: Option<usize>,

    /// Override the base RNG seed for dealing.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,

    /// Enable structured logging regardless of config.
    #[arg(long)]
    log_structured: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds_per_matchup {
        config.rounds.per_matchup = rounds;
    }

    if let Some(seed) = cli.seed {
        config.rounds.seed = Some(seed);
    }

    if cli.log_structured {
        config.logging.enable_structured = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let rounds_per_matchup = config.rounds.per_matchup;

    println!(
        "Loaded configuration '{run_id}' with {agent_count} agent{} ({rounds_per_matchup} rounds per matchup)",
        if agent_count == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs.clone());

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} matchup(s), {} agent bid-rate sample(s)",
        summary.matchups.len(),
        summary.bid_rates.len()
    );
    for m in &summary.matchups {
        println!(
            "  {} vs {}: {} rounds, A win rate {:.1}%",
            m.agent_a,
            m.agent_b,
            m.rounds,
            m.win_rate_a() * 100.0
        );
    }
    for b in &summary.bid_rates {
        println!(
            "  {}: bid rate {:.1}% over {} hands",
            b.agent,
            b.bid_rate() * 100.0,
            b.hands
        );
    }
    println!("JSONL rows: {}", outputs.jsonl.display());
    println!("Summary table: {}", outputs.summary_md.display());
    println!("Win-rate plot directory: {}", outputs.plots_dir.display());

    Ok(())
}
