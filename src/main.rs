//! CLI front-end for the database sync test-lifecycle extension.
//!
//! The library is designed to be driven by a host test framework; this
//! binary exposes the same triggers for manual use and for framework glue
//! that shells out.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use dbsync::error::SyncError;
use dbsync::exit_codes;
use dbsync::io::config::load_config;
use dbsync::orchestrator::SyncOrchestrator;
use dbsync::sink::{LineSink, StderrSink};

#[derive(Parser)]
#[command(
    name = "dbsync",
    version,
    about = "Sync a destination database from a source around test runs"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "dbsync.toml")]
    config: PathBuf,

    /// Force verbose output regardless of the configured flag.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate aliases and cache target without syncing.
    Check,
    /// Run the sync pipeline once.
    Sync,
    /// Fire the suite-start trigger (syncs when `populate` is set).
    SuiteStart,
    /// Fire the test-end trigger (syncs when `cleanup` is set).
    TestEnd,
}

fn main() {
    dbsync::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        let code = match err.downcast_ref::<SyncError>() {
            Some(SyncError::Configuration(_)) => exit_codes::CONFIG_INVALID,
            _ => exit_codes::FAILURE,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if cli.verbose {
        config.verbose = true;
    }

    let mut sink = StderrSink;
    let orchestrator = SyncOrchestrator::new(config, &mut sink)?;
    match cli.command {
        Command::Check => {
            sink.write_line("Configuration ok: aliases reachable, cache target accepted.");
            Ok(())
        }
        Command::Sync => Ok(orchestrator.sync_now(&mut sink)?),
        Command::SuiteStart => Ok(orchestrator.on_suite_start(&mut sink)?),
        Command::TestEnd => Ok(orchestrator.on_test_end(&mut sink)?),
    }
}
