//! lockstep CLI
//!
//! Compares two programs' syntax trees in lock step, auto-skipping
//! resynchronizable divergences and arbitrating the rest interactively.

mod interactive;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;

use lockstep_core::{CompareConfig, CompareInput, Outcome, SyncReport, Synchronizer};

use crate::interactive::InteractiveDecisions;

/// lockstep - lock-step structural comparison of two syntax trees
#[derive(Parser)]
#[command(name = "lockstep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First program to compare
    first: PathBuf,

    /// Second program to compare
    second: PathBuf,

    /// Truncation bound (bytes) for rendered source excerpts
    #[arg(long, default_value_t = 50, value_name = "N")]
    snippet_length: usize,

    /// Halt for arbitration on lone block statements instead of skipping
    /// them
    #[arg(long)]
    no_skip_blocks: bool,

    /// Log the matched pair of every agreeing round
    #[arg(long)]
    show_intermediate: bool,

    /// Replace newlines in excerpts with spaces
    #[arg(long)]
    flatten: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    // Parse failure of either input aborts before any comparison starts.
    let first = lockstep_parser::parse_file(&cli.first).into_diagnostic()?;
    let second = lockstep_parser::parse_file(&cli.second).into_diagnostic()?;

    let config = CompareConfig::new()
        .snippet_length(cli.snippet_length)
        .skip_blocks(!cli.no_skip_blocks)
        .display_intermediate(cli.show_intermediate)
        .flatten_newlines(cli.flatten);

    let sync = Synchronizer::new(
        CompareInput::new(first.tree, first.source),
        CompareInput::new(second.tree, second.source),
        config,
        InteractiveDecisions::stdin(),
    );
    let report = sync.run().into_diagnostic()?;

    print_report(&report);
    Ok(report.is_clean())
}

fn print_report(report: &SyncReport) {
    match report.outcome {
        Outcome::Finished => {
            println!(
                "Comparison finished: {} round(s), {} arbitration halt(s)",
                report.rounds, report.arbitrations
            );
        }
        Outcome::DivergentTermination { pending } => {
            println!(
                "Trees differ in size: program {pending} still had nodes pending after {} round(s)",
                report.rounds
            );
        }
    }
}
