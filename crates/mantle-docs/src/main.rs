//! Mantle docs CLI - sidebar navigation for the documentation site.
//!
//! Provides commands for:
//! - `check`: Validate every version's sidebar
//! - `build`: Write generator sidebar JSON for every version
//! - `show`: Print one version's sidebar

mod commands;
mod error;
mod output;
mod sidebars;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, ShowArgs};
use output::Output;

/// Mantle documentation sidebars.
#[derive(Parser)]
#[command(name = "mantle-docs", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sidebar declarations for every version.
    Check(CheckArgs),
    /// Write sidebar JSON for every version.
    Build(BuildArgs),
    /// Print one version's sidebar JSON.
    Show(ShowArgs),
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
