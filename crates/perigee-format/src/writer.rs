//! Intake-compatible DIMACS file writer.
//!
//! `CnfWriter` mirrors the solver's clause-intake surface but collects
//! clauses instead of solving them, so an encoder can be pointed at either
//! one. `write` emits the collected formula as a DIMACS CNF file.

use perigee_base::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Collects clauses and writes them as DIMACS CNF.
#[derive(Debug, Clone, Default)]
pub struct CnfWriter {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
}

impl CnfWriter {
    /// Creates a writer for variables `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Records a unit clause.
    pub fn add_unit(&mut self, lit: i32) -> Result<()> {
        self.add_clause(&[lit])
    }

    /// Records a clause.
    pub fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        for &lit in lits {
            if lit == 0 || lit.unsigned_abs() > self.num_vars {
                return Err(Error::InvalidLiteral(lit));
            }
        }
        self.clauses.push(lits.to_vec());
        Ok(())
    }

    /// Number of collected clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Writes the collected formula to `path` in DIMACS CNF format.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.emit(&mut out)
    }

    /// Writes the DIMACS text to any sink.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(out, "{lit} ")?;
            }
            writeln!(out, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DimacsCnf;

    #[test]
    fn test_emit_matches_dimacs() {
        let mut writer = CnfWriter::new(2);
        writer.add_unit(-2).unwrap();
        writer.add_clause(&[-1, 2]).unwrap();

        let mut out = Vec::new();
        writer.emit(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "p cnf 2 2\n-2 0\n-1 2 0\n");

        let parsed = DimacsCnf::parse(&text).unwrap();
        assert_eq!(parsed.clauses, vec![vec![-2], vec![-1, 2]]);
    }

    #[test]
    fn test_rejects_invalid_literals() {
        let mut writer = CnfWriter::new(2);
        assert!(matches!(writer.add_unit(0), Err(Error::InvalidLiteral(0))));
        assert!(matches!(
            writer.add_clause(&[1, 3]),
            Err(Error::InvalidLiteral(3))
        ));
        assert_eq!(writer.num_clauses(), 0);
    }
}
