//! `pegs results`: the end-of-cycle leaderboard, winners and losers.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use pegs_core::config::EngineConfig;
use pegs_core::{CycleReport, PegEvent, PersonResult, close_out};

use super::events::load_events;
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};

/// Arguments for `pegs results`.
#[derive(Args, Debug)]
pub struct ResultsArgs {
    /// Cycle snapshot: a JSON array or JSON Lines file (`-` for stdin).
    pub events: PathBuf,

    /// Category to report; repeatable. Replaces the configured keyword list.
    #[arg(long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,
}

/// Execute `pegs results`.
pub fn run_results(
    args: &ResultsArgs,
    config: &EngineConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let events = load_events(&args.events)?;
    let categories: &[String] = if args.categories.is_empty() {
        config.categories()
    } else {
        &args.categories
    };

    let report = close_out(&events, categories, &config.award_policy())?;
    render_mode(output, &report, render_results_text, render_results_pretty)
}

fn render_results_text(report: &CycleReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "rank\tperson_id\tname\tscore\treceived\tpenalties\taward")?;
    for (i, result) in report.leaderboard.iter().enumerate() {
        let award = if i < report.winners.len() {
            "winner"
        } else {
            "loser"
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{award}",
            i + 1,
            result.person_id,
            result.person_name,
            result.weighted_pegs_received,
            result.valid_pegs_received.len(),
            result.penalty_pegs_given.len(),
        )?;
    }

    for section in &report.categories {
        for (i, view) in section.entries.iter().enumerate() {
            writeln!(
                w,
                "category={}\t{}\t{}\t{}\t{}",
                section.category,
                i + 1,
                view.person_id,
                view.person_name,
                view.weighted_pegs_received,
            )?;
        }
    }
    Ok(())
}

fn render_results_pretty(report: &CycleReport, w: &mut dyn Write) -> io::Result<()> {
    let totals = report.totals;
    pretty_section(
        w,
        &format!(
            "Cycle results ({} pegs, {} valid, {} penalties)",
            totals.total, totals.valid, totals.penalties
        ),
    )?;
    if report.leaderboard.is_empty() {
        writeln!(w, "No pegs this cycle.")?;
        return Ok(());
    }
    for (i, result) in report.leaderboard.iter().enumerate() {
        write_standing(w, i + 1, result)?;
    }

    for (heading, results) in [("Winners", &report.winners), ("Losers", &report.losers)] {
        if results.is_empty() {
            continue;
        }
        writeln!(w)?;
        pretty_section(w, heading)?;
        for result in results {
            writeln!(
                w,
                "{:<20} {}",
                result.person_name,
                pegs_total(result.weighted_pegs_received, result.valid_pegs_received.len())
            )?;
        }
    }

    if !report.penalties.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Penalties")?;
        for result in &report.penalties {
            writeln!(
                w,
                "{} gave {}",
                result.person_name,
                receiver_list(&result.penalty_pegs_given)
            )?;
        }
    }

    for section in &report.categories {
        writeln!(w)?;
        pretty_section(w, &format!("Category: {}", section.category))?;
        if section.entries.is_empty() {
            writeln!(w, "  (nobody)")?;
        }
        for (i, view) in section.entries.iter().enumerate() {
            writeln!(
                w,
                "{:>3}. {:<20} {:>4}",
                i + 1,
                view.person_name,
                view.weighted_pegs_received
            )?;
        }
    }
    pretty_rule(w)
}

fn write_standing(w: &mut dyn Write, position: usize, result: &PersonResult) -> io::Result<()> {
    writeln!(
        w,
        "{position:>3}. {:<20} {:>4}  ({} received, {} penalties)",
        result.person_name,
        result.weighted_pegs_received,
        result.valid_pegs_received.len(),
        result.penalty_pegs_given.len(),
    )?;
    if !result.valid_pegs_received.is_empty() {
        writeln!(w, "     from: {}", sender_list(&result.valid_pegs_received))?;
    }
    Ok(())
}

/// `"3 pegs"`, or `"3 (4) pegs"` when penalties moved the score off the
/// raw received count.
fn pegs_total(weighted: i64, received: usize) -> String {
    let noun = if weighted.unsigned_abs() == 1 && received == 1 {
        "peg"
    } else {
        "pegs"
    };
    if usize::try_from(weighted).is_ok_and(|score| score == received) {
        format!("{weighted} {noun}")
    } else {
        format!("{weighted} ({received}) {noun}")
    }
}

fn sender_list(pegs: &[PegEvent]) -> String {
    pegs.iter()
        .map(|peg| peg.sender_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn receiver_list(pegs: &[PegEvent]) -> String {
    pegs.iter()
        .map(|peg| peg.receiver_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
