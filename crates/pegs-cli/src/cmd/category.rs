//! `pegs category`: one category's leaderboard.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use pegs_core::{CategoryView, aggregate, project_by_category};

use super::events::load_events;
use crate::output::{OutputMode, Renderable, write_list};

/// Arguments for `pegs category`.
#[derive(Args, Debug)]
pub struct CategoryArgs {
    /// Cycle snapshot: a JSON array or JSON Lines file (`-` for stdin).
    pub events: PathBuf,

    /// Category label to rank by. Matching is exact and case-sensitive.
    pub category: String,
}

/// Execute `pegs category`.
pub fn run_category(args: &CategoryArgs, output: OutputMode) -> anyhow::Result<()> {
    let events = load_events(&args.events)?;
    let standings = aggregate(&events)?;
    let views = project_by_category(&standings, &args.category);

    let stdout = io::stdout();
    write_category(&views, &args.category, output, &mut stdout.lock())?;
    Ok(())
}

/// Text and JSON stay machine-readable for an empty board; only pretty
/// output explains it.
fn write_category(
    views: &[CategoryView],
    category: &str,
    output: OutputMode,
    out: &mut dyn Write,
) -> io::Result<()> {
    if views.is_empty() && output == OutputMode::Pretty {
        return writeln!(out, "No pegs in category '{category}'.");
    }
    write_list(views, output, out)
}

impl Renderable for CategoryView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<20} {:>4}  [{}]",
            self.person_name, self.weighted_pegs_received, self.category
        )?;
        for peg in &self.valid_pegs_received {
            if peg.comment.is_empty() {
                writeln!(w, "    from {}", peg.sender_name)?;
            } else {
                writeln!(w, "    from {}: {}", peg.sender_name, peg.comment)?;
            }
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            self.person_id,
            self.person_name,
            self.weighted_pegs_received,
            self.penalty_pegs_given.len()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["person_id", "name", "count", "penalties"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegs_core::PegEvent;

    fn view() -> CategoryView {
        let peg = PegEvent {
            sender_id: "p2".into(),
            sender_name: "Gillian".into(),
            receiver_id: "p1".into(),
            receiver_name: "Luke".into(),
            comment: "stayed late".into(),
            categories: ["brave".to_string()].into_iter().collect(),
            is_valid: true,
        };
        let standings = aggregate(&[peg]).unwrap();
        project_by_category(&standings, "brave").remove(0)
    }

    #[test]
    fn human_lists_senders_with_comments() {
        let mut buf = Vec::new();
        view().render_human(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("Luke"));
        assert!(out.contains("from Gillian: stayed late"));
    }

    fn written(views: &[CategoryView], output: OutputMode) -> String {
        let mut buf = Vec::new();
        write_category(views, "brave", output, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_board_text_output_is_empty() {
        assert_eq!(written(&[], OutputMode::Text), "");
        assert_eq!(written(&[], OutputMode::Json).trim(), "[\n]");
        assert_eq!(
            written(&[], OutputMode::Pretty),
            "No pegs in category 'brave'.\n"
        );
    }

    #[test]
    fn text_board_is_header_and_rows() {
        assert_eq!(
            written(&[view()], OutputMode::Text),
            "person_id\tname\tcount\tpenalties\np1\tLuke\t1\t0\n"
        );
    }

    #[test]
    fn table_row_matches_headers() {
        let mut buf = Vec::new();
        view().render_table(&mut buf).unwrap();
        let row = String::from_utf8(buf).unwrap();
        assert_eq!(row, "p1\tLuke\t1\t0\n");
        assert_eq!(
            row.trim_end().split('\t').count(),
            CategoryView::table_headers().len()
        );
    }
}
