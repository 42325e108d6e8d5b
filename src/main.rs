//! ccup - custom component updater CLI tool
//!
//! Checks GitHub-hosted custom components of an installation against their
//! latest release, branch head or pinned tag:
//! - default: exit code = number of outdated repositories
//! - `--json`: print the outdated report
//! - `--update`: install every outdated component

use ccup::cli::CliArgs;
use ccup::config::{Mode, RunConfig};
use ccup::error::ConfigError;
use ccup::orchestrator::{Orchestrator, OrchestratorResult};
use ccup::output::{create_formatter, OutputConfig};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Largest value a process exit code can carry
const MAX_EXIT_CODE: usize = 255;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,ccup=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = match RunConfig::from_cli(&args) {
        Ok(config) => config,
        Err(e) => return silent_or_error(e),
    };

    debug!(
        "ccup v{} on {} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.installation.root().display(),
        config.mode
    );

    let mode = config.mode;
    let orchestrator = Orchestrator::new(config)?;
    let result = match orchestrator.run().await {
        Ok(result) => result,
        Err(e) => return silent_or_error(e),
    };

    // Create output formatter based on CLI options
    let formatter = create_formatter(OutputConfig::from_mode(mode, args.verbose, args.quiet));

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    Ok(exit_code(mode, &result))
}

/// Ends the run silently for the conditions that are not failures
fn silent_or_error(error: ConfigError) -> anyhow::Result<ExitCode> {
    if error.is_silent() {
        debug!("{}", error);
        Ok(ExitCode::SUCCESS)
    } else {
        Err(error.into())
    }
}

/// Exit code for a finished run
fn exit_code(mode: Mode, result: &OrchestratorResult) -> ExitCode {
    match mode {
        Mode::ReportCode => {
            let count = result.outdated_count().min(MAX_EXIT_CODE);
            ExitCode::from(u8::try_from(count).unwrap_or(u8::MAX))
        }
        Mode::ReportJson | Mode::Update => ExitCode::SUCCESS,
    }
}
