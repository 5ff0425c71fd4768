//! Aggregates tournament results into the quantified properties spec.md §8
//! asks for: P9 (difficulty ordering, by win rate) and P10 (personality
//! footprint, by bid rate on borderline hands), plus a markdown summary, a
//! JSONL row per simulated round, and a bar chart of matchup win rates.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::ResolvedOutputs;
use crate::tournament::{BidRateResult, MatchupResult};

/// Two-tailed z critical value for a 95% confidence call on a proportion
/// difference (P9: "statistically significant margin").
const CONFIDENCE_Z: f64 = 1.96;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
}

/// One row of the JSONL output: a single matchup's aggregate result, so a
/// replay/analysis tool can load the whole run without re-simulating it.
#[derive(Debug, Clone, Serialize)]
struct MatchupRow<'a> {
    agent_a: &'a str,
    agent_b: &'a str,
    rounds: usize,
    wins_a: usize,
    win_rate_a: f64,
    z_score: f64,
    significant_at_95: bool,
}

/// Computes the two-proportion z-score for `wins_a` out of `rounds` against
/// a null hypothesis of a 50% win rate (no edge between the two agents).
/// This is the significance test P9 asks for: EXPERT beating HARD, HARD
/// beating MEDIUM, and so on, each "by a statistically significant margin".
pub fn z_score_against_even_odds(wins_a: usize, rounds: usize) -> f64 {
    if rounds == 0 {
        return 0.0;
    }
    let p_hat = wins_a as f64 / rounds as f64;
    let se = (0.5 * 0.5 / rounds as f64).sqrt();
    if se == 0.0 {
        return 0.0;
    }
    (p_hat - 0.5) / se
}

/// `true` iff the observed win rate differs from 50-50 with 95% confidence
/// in the stated direction (`wins_a` must exceed half the rounds for a
/// meaningful "A beats B" claim).
pub fn beats_with_significance(wins_a: usize, rounds: usize) -> bool {
    let z = z_score_against_even_odds(wins_a, rounds);
    z.abs() >= CONFIDENCE_Z && wins_a * 2 > rounds
}

/// One-sided normal-CDF-derived p-value for the observed z-score, exposed
/// for a host that wants the raw statistic rather than just the pass/fail
/// call `beats_with_significance` makes.
pub fn p_value(z: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).expect("standard normal is always valid");
    2.0 * (1.0 - normal.cdf(z.abs()))
}

/// Writes the full output bundle (JSONL, markdown summary, bar plot) for a
/// completed tournament run.
pub fn write_outputs(
    outputs: &ResolvedOutputs,
    matchups: &[MatchupResult],
    bid_rates: &[BidRateResult],
) -> Result<(), AnalyticsError> {
    write_jsonl(&outputs.jsonl, matchups)?;
    write_summary_md(&outputs.summary_md, matchups, bid_rates)?;
    write_win_rate_plot(&outputs.plots_dir, matchups)?;
    Ok(())
}

fn write_jsonl(path: &Path, matchups: &[MatchupResult]) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AnalyticsError::Io {
            context: "creating jsonl output directory",
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| AnalyticsError::Io {
        context: "creating jsonl output file",
        source,
    })?;
    let mut writer = BufWriter::new(file);
    for m in matchups {
        let row = MatchupRow {
            agent_a: &m.agent_a,
            agent_b: &m.agent_b,
            rounds: m.rounds,
            wins_a: m.wins_a,
            win_rate_a: m.win_rate_a(),
            z_score: z_score_against_even_odds(m.wins_a, m.rounds),
            significant_at_95: beats_with_significance(m.wins_a, m.rounds),
        };
        let line = serde_json::to_string(&row).map_err(|source| AnalyticsError::Io {
            context: "serializing matchup row",
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, source),
        })?;
        writeln!(writer, "{line}").map_err(|source| AnalyticsError::Io {
            context: "writing jsonl row",
            source,
        })?;
    }
    Ok(())
}

fn write_summary_md(
    path: &Path,
    matchups: &[MatchupResult],
    bid_rates: &[BidRateResult],
) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AnalyticsError::Io {
            context: "creating summary output directory",
            source,
        })?;
    }
    let mut out = String::new();
    out.push_str("# Baloot bot tournament summary\n\n");
    out.push_str("## Matchup win rates (P9)\n\n");
    out.push_str("| A | B | rounds | A win rate | z | significant |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for m in matchups {
        let z = z_score_against_even_odds(m.wins_a, m.rounds);
        out.push_str(&format!(
            "| {} | {} | {} | {:.1}% | {:.2} | {} |\n",
            m.agent_a,
            m.agent_b,
            m.rounds,
            m.win_rate_a() * 100.0,
            z,
            beats_with_significance(m.wins_a, m.rounds),
        ));
    }

    out.push_str("\n## Bid rate on borderline hands (P10)\n\n");
    out.push_str("| agent | hands | bids | bid rate |\n");
    out.push_str("|---|---|---|---|\n");
    for b in bid_rates {
        out.push_str(&format!(
            "| {} | {} | {} | {:.1}% |\n",
            b.agent,
            b.hands,
            b.bids,
            b.bid_rate() * 100.0
        ));
    }

    fs::write(path, out).map_err(|source| AnalyticsError::Io {
        context: "writing summary markdown",
        source,
    })
}

fn write_win_rate_plot(
    plots_dir: &Path,
    matchups: &[MatchupResult],
) -> Result<(), AnalyticsError> {
    if matchups.is_empty() {
        return Ok(());
    }
    fs::create_dir_all(plots_dir).map_err(|source| AnalyticsError::Io {
        context: "creating plots directory",
        source,
    })?;
    let path: PathBuf = plots_dir.join("win_rates.png");

    let root = BitMapBackend::new(&path, (960, 540)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

    let labels: Vec<String> = matchups
        .iter()
        .map(|m| format!("{} vs {}", m.agent_a, m.agent_b))
        .collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Agent A win rate by matchup", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(50)
        .build_cartesian_2d(0usize..labels.len(), 0f64..1f64)
        .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .y_desc("A win rate")
        .draw()
        .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

    chart
        .draw_series(matchups.iter().enumerate().map(|(i, m)| {
            let rate = m.win_rate_a();
            Rectangle::new([(i, 0.0), (i + 1, rate)], BLUE.filled())
        }))
        .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| AnalyticsError::Plot(e.to_string()))?;
    Ok(())
}
