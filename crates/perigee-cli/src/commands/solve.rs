//! Solve command.

use anyhow::Context;
use clap::Args;
use perigee_base::Error;
use perigee_cdcl::{SatResult, Solver};
use perigee_format::DimacsCnf;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
pub struct SolveArgs {
    /// Input DIMACS CNF file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Arena capacity in cells
    #[arg(short, long, default_value_t = 1 << 20)]
    pub memory: usize,

    /// Write the model (or UNSAT marker) to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print solver statistics as JSON
    #[arg(long)]
    pub stats: bool,
}

pub fn run(args: SolveArgs) -> anyhow::Result<()> {
    tracing::info!("reading {}", args.input.display());
    let content = fs::read_to_string(&args.input)?;
    let cnf = DimacsCnf::parse(&content)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    tracing::info!(
        vars = cnf.num_vars,
        clauses = cnf.clauses.len(),
        "parsed input"
    );

    let mut solver = Solver::new(cnf.num_vars, args.memory).map_err(memory_hint)?;
    for clause in &cnf.clauses {
        solver.add_clause(clause).map_err(memory_hint)?;
    }

    let start = Instant::now();
    let result = solver.solve().map_err(memory_hint)?;
    let elapsed = start.elapsed();

    match &result {
        SatResult::Sat(model) => {
            println!("s SATISFIABLE");
            let line: String = model
                .lits()
                .map(|lit| lit.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("v {line} 0");
            if let Some(output) = &args.output {
                fs::write(output, format!("v {line} 0\n"))?;
            }
        }
        SatResult::Unsat => {
            println!("s UNSATISFIABLE");
            if let Some(output) = &args.output {
                fs::write(output, "s UNSATISFIABLE\n")?;
            }
        }
    }

    tracing::info!(?elapsed, "search finished");
    println!("c solved in {:.3}s", elapsed.as_secs_f64());
    if args.stats {
        println!("{}", serde_json::to_string_pretty(solver.stats())?);
    }
    Ok(())
}

/// Turns arena exhaustion into advice the user can act on.
fn memory_hint(err: Error) -> anyhow::Error {
    match err {
        Error::OutOfMemory { .. } => {
            anyhow::Error::new(err).context("arena exhausted; retry with a larger --memory")
        }
        other => other.into(),
    }
}
