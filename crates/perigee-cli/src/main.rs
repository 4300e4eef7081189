//! Perigee CLI - command-line interface for the SAT solver.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perigee")]
#[command(author, version, about = "Compact CDCL SAT Solver", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a DIMACS CNF problem
    Solve(commands::solve::SolveArgs),
    /// Parse a DIMACS CNF file and write it back normalized
    Convert(commands::convert::ConvertArgs),
}

/// Maps repeated `-v` flags onto a log level.
fn verbosity_filter(count: u8) -> &'static str {
    match count {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(verbosity_filter(cli.verbose)))
        .init();

    match cli.command {
        Commands::Solve(args) => commands::solve::run(args),
        Commands::Convert(args) => commands::convert::run(args),
    }
}
