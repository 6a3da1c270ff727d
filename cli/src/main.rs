//! CLI for the pull-request preview worker.
//!
//! Intended to be invoked by an external scheduler (cron). One invocation is
//! one full run: refresh master, rebuild its gallery, deploy every open
//! mergeable pull request, post preview links.

use clap::Parser;
use preview_worker::{Runner, RunnerConfig, RunnerError, RunSummary};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Preview worker - build usage-example galleries for open pull requests and
/// post preview links.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the local repository clone.
    #[arg(default_value = "/home/yova1074/emperor/")]
    repo_path: PathBuf,

    /// Path to the master deployment directory.
    #[arg(default_value = "/var/www/html/master")]
    master_path: PathBuf,

    /// GitHub token used to post deployment comments.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Append logs to this file instead of standard error.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse arguments
    let args = Args::parse();

    // Initialize tracing before anything else can log
    if let Err(e) = init_tracing(args.log_file.as_deref()) {
        eprintln!("could not open log file: {e}");
        return ExitCode::from(1);
    }

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Fatal failure, run aborted");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
/// - Output to `log_file` when given (the scheduler discards stderr),
///   standard error otherwise
fn init_tracing(log_file: Option<&Path>) -> std::io::Result<()> {
    // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
    // Falls back to "info" level if RUST_LOG is not set or invalid
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                // Use compact formatting without module target paths for cleaner output
                .with(fmt::layer().compact().with_target(false))
                .with(filter)
                .init();
        }
    }

    Ok(())
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = RunnerConfig::new(args.repo_path, args.master_path, args.token);
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Pull requests discovered: {}", summary.pulls_discovered);
    println!("  Previews deployed: {}", summary.deployed);
    println!("  Skipped (not mergeable): {}", summary.skipped);
    println!("  Recovered after failure: {}", summary.recovered);
    println!("  Comments posted: {}", summary.comments_posted);
    println!("  Comments skipped: {}", summary.comments_skipped);
    println!("  Comments failed: {}", summary.comments_failed);
}
