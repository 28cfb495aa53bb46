//! IPD tournament runner
//!
//! Parses the run configuration, executes the round-robin tournament and
//! renders the pairwise table, mean matrix and leaderboard, plus a results
//! file in CSV or JSON form.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use dilemma_logic::{run_tournament, PayoffMatrix, TournamentConfig};

mod report;

#[derive(Parser)]
#[command(name = "ipd-tournament")]
#[command(about = "Iterated Prisoner's Dilemma round-robin tournament", long_about = None)]
struct Cli {
    /// Rounds per match
    #[arg(long)]
    rounds: u32,

    /// Repetitions per pairing
    #[arg(long)]
    repeats: u32,

    /// Comma-separated strategy names
    /// (ALLC, ALLD, TFT, GRIM, PAVLOV, CTFT, PROBER, TROJAN, RIVAL, RND<p>)
    #[arg(long, value_delimiter = ',', required = true)]
    strategies: Vec<String>,

    /// Payoff values as T,R,P,S
    #[arg(long, value_delimiter = ',', default_values_t = [5.0, 3.0, 1.0, 0.0])]
    payoff: Vec<f64>,

    /// RNG seed; must be given together with --epsilon
    #[arg(long, requires = "epsilon")]
    seed: Option<u64>,

    /// Per-round action flip probability; must be given together with --seed
    #[arg(long, requires = "seed")]
    epsilon: Option<f64>,

    /// Results file path (defaults to results_<timestamp>.<ext>)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Results file format
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let &[t, r, p, s] = &cli.payoff[..] else {
        bail!("--payoff must be exactly four values: T,R,P,S");
    };
    let payoff = PayoffMatrix::new(t, r, p, s)?;

    let config = TournamentConfig {
        strategies: cli.strategies.clone(),
        rounds: cli.rounds,
        repeats: cli.repeats,
        payoff,
        seed: cli.seed.unwrap_or(0),
        epsilon: cli.epsilon,
    };

    println!(
        "Running IPD tournament: {} rounds | {} repeats | epsilon: {} | seed: {}",
        config.rounds,
        config.repeats,
        config.epsilon.unwrap_or(0.0),
        config.seed
    );

    let result = run_tournament(&config)?;

    report::print_pairings(&result);
    report::print_matrix(&result);
    report::print_leaderboard(&result);

    let path = cli
        .output
        .unwrap_or_else(|| report::default_results_path(cli.format.extension()));
    match cli.format {
        Format::Csv => report::write_csv(&path, &config, &result)?,
        Format::Json => report::write_json(&path, &result)?,
    }
    println!("\nTournament finished. Results available in {}", path.display());

    Ok(())
}
