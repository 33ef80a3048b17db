//! `pegs status`: one person's allowance and pegs for the cycle.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use pegs_core::config::EngineConfig;
use pegs_core::{QuotaPolicy, Role, StatusReport, status};

use super::events::load_events;
use crate::output::{OutputMode, Renderable, pretty_kv, pretty_section, render_item};

/// Arguments for `pegs status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Cycle snapshot: a JSON array or JSON Lines file (`-` for stdin).
    pub events: PathBuf,

    /// Person to report on.
    #[arg(long, value_name = "ID")]
    pub person: String,

    /// Per-cycle peg limit; overrides `numbers.limit` from config.
    #[arg(long)]
    pub limit: Option<i64>,

    /// Extra role held by the person; repeatable. Added to configured grants.
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<Role>,
}

impl StatusArgs {
    fn policy(&self, config: &EngineConfig) -> QuotaPolicy {
        let policy = config.quota_policy();
        match self.limit {
            Some(limit) => QuotaPolicy {
                limit: Some(limit),
                ..policy
            },
            None => policy,
        }
    }

    fn roles(&self, config: &EngineConfig) -> BTreeSet<Role> {
        let mut roles = config.roles_for(&self.person);
        roles.extend(self.roles.iter().copied());
        roles
    }
}

/// Execute `pegs status`.
pub fn run_status(
    args: &StatusArgs,
    config: &EngineConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let events = load_events(&args.events)?;
    let report = status(
        &args.person,
        &events,
        &args.roles(config),
        &args.policy(config),
    )?;
    render_item(&report, output)?;
    Ok(())
}

impl Renderable for StatusReport {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_section(w, &format!("Status for {}", self.person_id))?;
        pretty_kv(w, "remaining", self.quota.remaining.to_string())?;
        pretty_kv(w, "given", self.quota.given_count.to_string())?;
        pretty_kv(w, "received", self.valid_pegs_received.len().to_string())?;
        pretty_kv(w, "penalties", self.penalty_pegs_given.len().to_string())?;

        if !self.pegs_given.is_empty() {
            writeln!(w, "\nGiven:")?;
            for peg in &self.pegs_given {
                writeln!(w, "  -> {}", peg.receiver_name)?;
            }
        }
        if !self.valid_pegs_received.is_empty() {
            writeln!(w, "\nReceived:")?;
            for peg in &self.valid_pegs_received {
                writeln!(w, "  <- {}", peg.sender_name)?;
            }
        }
        if !self.penalty_pegs_given.is_empty() {
            writeln!(w, "\nPenalties:")?;
            for peg in &self.penalty_pegs_given {
                writeln!(w, "  -> {}", peg.receiver_name)?;
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
            "{}\t{}\t{}\t{}\t{}",
            self.person_id,
            self.quota.remaining,
            self.quota.given_count,
            self.valid_pegs_received.len(),
            self.penalty_pegs_given.len()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["person_id", "remaining", "given", "received", "penalties"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegs_core::{PegEvent, Remaining};
    use pegs_core::config::parse_config;

    fn args(extra: &[&str]) -> StatusArgs {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            status: StatusArgs,
        }

        let mut argv = vec!["pegs", "events.jsonl", "--person", "p1"];
        argv.extend_from_slice(extra);
        Harness::parse_from(argv).status
    }

    #[test]
    fn flag_limit_overrides_config() {
        let config = parse_config("[numbers]\nlimit = 5\n").unwrap();
        assert_eq!(args(&[]).policy(&config).limit, Some(5));
        assert_eq!(args(&["--limit", "2"]).policy(&config).limit, Some(2));
    }

    #[test]
    fn flag_roles_extend_configured_grants() {
        let config =
            parse_config("[[roles]]\nuser_id = \"p1\"\nrole = \"ADMIN\"\n").unwrap();
        let roles = args(&["--role", "unmetered"]).roles(&config);
        assert!(roles.contains(&Role::Admin));
        assert!(roles.contains(&Role::Unmetered));
    }

    #[test]
    fn human_lists_each_penalty_receiver() {
        let penalty = |receiver: &str| PegEvent {
            sender_id: "p1".into(),
            sender_name: "Luke".into(),
            receiver_id: format!("b-{receiver}"),
            receiver_name: receiver.into(),
            comment: String::new(),
            categories: BTreeSet::new(),
            is_valid: false,
        };
        let report = status(
            "p1",
            &[penalty("Zap"), penalty("Gif")],
            &BTreeSet::new(),
            &QuotaPolicy::new(Some(5)),
        )
        .unwrap();

        let mut buf = Vec::new();
        report.render_human(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let section = out.split("Penalties:\n").nth(1).unwrap();
        assert_eq!(section, "  -> Gif\n  -> Zap\n");
    }

    #[test]
    fn table_row_renders_unlimited() {
        let report = status(
            "p1",
            &[],
            &[Role::Unmetered].into_iter().collect(),
            &QuotaPolicy::new(None),
        )
        .unwrap();
        assert_eq!(report.quota.remaining, Remaining::Unlimited);
        let mut buf = Vec::new();
        report.render_table(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "p1\tunlimited\t0\t0\t0\n");
    }
}
