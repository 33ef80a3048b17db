#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use pegs_core::config::resolve_config;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pegs: peer recognition leaderboards and quotas",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format; defaults to pretty on a TTY and text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Config file; overrides PEGS_CONFIG and the user config dir.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Reports",
        about = "Show the cycle leaderboard",
        long_about = "Rank everyone by valid pegs received minus penalties given, then list penalties and per-category boards.",
        after_help = "EXAMPLES:\n    # Leaderboard with the configured categories\n    pegs results cycle.jsonl\n\n    # Only report the brave category\n    pegs results cycle.jsonl --category brave\n\n    # Emit machine-readable output\n    pegs results cycle.jsonl --json"
    )]
    Results(cmd::results::ResultsArgs),

    #[command(
        next_help_heading = "Reports",
        about = "Rank one category",
        long_about = "Rank people by the number of valid pegs received with one category label.",
        after_help = "EXAMPLES:\n    # Who was bravest this cycle\n    pegs category cycle.jsonl brave\n\n    # Read the snapshot from stdin\n    cat cycle.jsonl | pegs category - brave --format text"
    )]
    Category(cmd::category::CategoryArgs),

    #[command(
        next_help_heading = "Reports",
        about = "Show one person's quota and pegs",
        long_about = "Show how many pegs a person has left this cycle along with the pegs they gave and received.",
        after_help = "EXAMPLES:\n    # Remaining allowance from the configured limit\n    pegs status cycle.jsonl --person U123\n\n    # Override the limit\n    pegs status cycle.jsonl --person U123 --limit 10 --json"
    )]
    Status(cmd::status::StatusArgs),

    #[command(
        next_help_heading = "Utility",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash completions\n    pegs completions bash > ~/.local/share/bash-completion/completions/pegs"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PEGS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "pegs=debug,info"
        } else {
            "pegs=info,warn"
        })
    });

    let format = env::var("PEGS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command);
    }

    let config = resolve_config(cli.config.as_deref())?;
    debug!(limit = ?config.limit(), categories = config.categories().len(), "config resolved");

    match &cli.command {
        Commands::Results(args) => cmd::results::run_results(args, &config, output),
        Commands::Category(args) => cmd::category::run_category(args, output),
        Commands::Status(args) => cmd::status::run_status(args, &config, output),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if render_error(output, &CliError::from_anyhow(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_parses_before_and_after_subcommand() {
        let cli = Cli::parse_from(["pegs", "--json", "results", "cycle.jsonl"]);
        assert!(cli.json);
        let cli = Cli::parse_from(["pegs", "results", "cycle.jsonl", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_is_global() {
        let cli = Cli::parse_from(["pegs", "category", "cycle.jsonl", "brave", "--format", "text"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
        assert!(matches!(
            cli.command,
            Commands::Category(ref args) if args.category == "brave"
        ));
    }

    #[test]
    fn results_category_flag_repeats() {
        let cli = Cli::parse_from([
            "pegs",
            "results",
            "cycle.jsonl",
            "--category",
            "brave",
            "--category",
            "customer",
        ]);
        let Commands::Results(args) = cli.command else {
            panic!("expected results");
        };
        assert_eq!(args.categories, ["brave", "customer"]);
    }

    #[test]
    fn status_requires_person() {
        assert!(Cli::try_parse_from(["pegs", "status", "cycle.jsonl"]).is_err());
        let cli = Cli::parse_from([
            "pegs", "status", "cycle.jsonl", "--person", "U1", "--limit", "3",
        ]);
        let Commands::Status(args) = cli.command else {
            panic!("expected status");
        };
        assert_eq!(args.person, "U1");
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn status_rejects_unknown_role() {
        let parsed = Cli::try_parse_from([
            "pegs", "status", "cycle.jsonl", "--person", "U1", "--role", "wizard",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn config_flag_parsed() {
        let cli = Cli::parse_from(["pegs", "--config", "/tmp/pegs.toml", "results", "-"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pegs.toml")));
    }
}
