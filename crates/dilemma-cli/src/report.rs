//! Console and file rendering of tournament results

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use dilemma_logic::{ScoreSummary, TournamentConfig, TournamentResult};

/// `results_YYYYMMDD_HHMMSS.<ext>` in the working directory.
pub fn default_results_path(extension: &str) -> PathBuf {
    PathBuf::from(format!(
        "results_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        extension
    ))
}

/// Per-pairing console block: means and 95% confidence intervals.
pub fn print_pairings(result: &TournamentResult) {
    for pair in &result.pairings {
        println!("\n{} vs {}:", pair.first, pair.second);
        println!(
            "  Player 1 ({}) Mean = {:.2}, 95% CI [{}, {}]",
            pair.first,
            pair.first_summary.mean,
            ci_low(&pair.first_summary),
            ci_high(&pair.first_summary)
        );
        println!(
            "  Player 2 ({}) Mean = {:.2}, 95% CI [{}, {}]",
            pair.second,
            pair.second_summary.mean,
            ci_low(&pair.second_summary),
            ci_high(&pair.second_summary)
        );
        println!("-------------------------------------");
    }
}

/// Square matrix of mean scores; self cells render as N/A.
pub fn print_matrix(result: &TournamentResult) {
    let width = result
        .strategies
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        .max(8)
        + 2;

    println!("\n=== Mean score matrix ===");
    print!("{:width$}", "");
    for name in &result.strategies {
        print!("{:>width$}", name);
    }
    println!();

    for (row_name, row) in result.strategies.iter().zip(result.mean_matrix()) {
        print!("{:width$}", row_name);
        for cell in row {
            match cell {
                Some(mean) => print!("{:>width$.2}", mean),
                None => print!("{:>width$}", "N/A"),
            }
        }
        println!();
    }
}

/// Ranked leaderboard: pooled mean and stdev per strategy.
pub fn print_leaderboard(result: &TournamentResult) {
    println!("\n=== Leaderboard ===");
    for (rank, row) in result.leaderboard.iter().enumerate() {
        println!(
            "{:>2}. {:10} mean = {:8.2}  stdev = {:.2}",
            rank + 1,
            row.name,
            row.mean,
            row.stdev
        );
    }
}

/// Write the pairwise results table with a small header block, matching the
/// layout consumed by the analysis spreadsheets.
pub fn write_csv(path: &Path, config: &TournamentConfig, result: &TournamentResult) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating results file {}", path.display()))?;

    writer.write_record(["Rounds:".to_string(), config.rounds.to_string()])?;
    writer.write_record(["Repetitions:".to_string(), config.repeats.to_string()])?;
    writer.write_record([
        "Payoff:".to_string(),
        format!(
            "{},{},{},{}",
            config.payoff.t(),
            config.payoff.r(),
            config.payoff.p(),
            config.payoff.s()
        ),
    ])?;
    writer.write_record([
        "Strategy[1]",
        "Strategy[2]",
        "Mean[1]",
        "Mean[2]",
        "Stdev[1]",
        "Stdev[2]",
        "CI_Low[1]",
        "CI_Up[1]",
        "CI_Low[2]",
        "CI_Up[2]",
    ])?;

    for pair in &result.pairings {
        writer.write_record([
            pair.first.clone(),
            pair.second.clone(),
            format!("{}", pair.first_summary.mean),
            format!("{}", pair.second_summary.mean),
            format!("{}", pair.first_summary.stdev),
            format!("{}", pair.second_summary.stdev),
            ci_low(&pair.first_summary),
            ci_high(&pair.first_summary),
            ci_low(&pair.second_summary),
            ci_high(&pair.second_summary),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Dump the full result structure as pretty JSON.
pub fn write_json(path: &Path, result: &TournamentResult) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating results file {}", path.display()))?;
    serde_json::to_writer_pretty(file, result)?;
    Ok(())
}

fn ci_low(summary: &ScoreSummary) -> String {
    match summary.ci95 {
        Some((low, _)) => format!("{low}"),
        None => "N/A".to_string(),
    }
}

fn ci_high(summary: &ScoreSummary) -> String {
    match summary.ci95 {
        Some((_, high)) => format!("{high}"),
        None => "N/A".to_string(),
    }
}
