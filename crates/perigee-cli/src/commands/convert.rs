//! Convert command.

use anyhow::Context;
use clap::Args;
use perigee_format::{CnfWriter, DimacsCnf};
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConvertArgs {
    /// Input DIMACS CNF file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file for the normalized DIMACS CNF
    #[arg(required = true)]
    pub output: PathBuf,
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.input)?;
    let cnf = DimacsCnf::parse(&content)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let mut writer = CnfWriter::new(cnf.num_vars);
    for clause in &cnf.clauses {
        writer.add_clause(clause)?;
    }
    writer.write(&args.output)?;

    tracing::info!(
        "Wrote {} clauses over {} variables to {:?}",
        writer.num_clauses(),
        cnf.num_vars,
        args.output
    );
    println!(
        "c converted {} -> {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}
