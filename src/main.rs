//! constraint-sync CLI
//!
//! Usage:
//!   constraint-sync [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Sync configuration (TOML format)
//!   -d, --debug          Log every sync issue and solver step
//!   -w, --write <FILE>   Write the solved layout document to FILE
//!   -l, --lint           Report attributes that do not sync cleanly
//!   -h, --help           Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use constraint_sync::value::parse_value;
use constraint_sync::{
    sync_file, sync_tree, Document, SyncConfig, SyncError, SyncIssue, SyncOutcome,
};

#[derive(Parser)]
#[command(name = "constraint-sync")]
#[command(about = "Sync layout attributes with a widget constraint graph and solve it")]
struct Cli {
    /// Layout document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Sync configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug mode: log sync issues and solver steps
    #[arg(short, long)]
    debug: bool,

    /// Write the solved layout document to this file
    #[arg(short, long, value_name = "FILE")]
    write: Option<PathBuf>,

    /// Report attributes that do not sync cleanly
    #[arg(short, long)]
    lint: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("constraint_sync=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("No input. Pass a layout document or pipe one on stdin (see --help).");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(outcome) => {
            for issue in &outcome.issues {
                eprintln!("issue: {}", issue);
                report_value_errors(issue);
            }
            if cli.lint {
                for warning in outcome.lint() {
                    eprintln!("{}", warning);
                }
            }
            print!("{}", outcome.format_frames());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<SyncOutcome, SyncError> {
    let config = match &cli.config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    };

    let outcome = match &cli.input {
        Some(path) => sync_file(path, &config)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(constraint_sync::DocumentError::from)?;
            sync_tree(Document::from_str(&buffer)?.to_tree()?, &config)?
        }
    };

    if let Some(path) = &cli.write {
        outcome.to_document().save(path)?;
        tracing::info!(path = %path.display(), "wrote solved layout");
    }
    Ok(outcome)
}

/// Show where a malformed value stops parsing
fn report_value_errors(issue: &SyncIssue) {
    let SyncIssue::MalformedValue {
        attribute, value, ..
    } = issue
    else {
        return;
    };
    if let Err(errors) = parse_value(value) {
        for error in errors {
            eprint!("{}", error.format(value, attribute));
        }
    }
}
