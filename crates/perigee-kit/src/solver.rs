//! Auto-sized solving.

use crate::encode::CnfBuilder;
use perigee_base::{Error, Result};
use perigee_cdcl::arena::MAX_CAPACITY;
use perigee_cdcl::{SatResult, Solver};

/// A solver front end that owns its clauses and sizes the arena itself.
///
/// Each call to [`AutoSolver::solve`] builds a fresh core solver, so clauses
/// may keep arriving between solves; blocking an earlier model and solving
/// again enumerates further models. When the capacity estimate proves too
/// small the wrapper doubles it and retries, which is the documented
/// recovery for `OutOfMemory`.
pub struct AutoSolver {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
}

impl AutoSolver {
    /// Creates a solver for variables `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Takes over a builder's variables and clauses.
    #[must_use]
    pub fn from_builder(builder: CnfBuilder) -> Self {
        Self {
            num_vars: builder.num_vars(),
            clauses: builder.into_clauses(),
        }
    }

    /// Records a clause.
    pub fn add_clause(&mut self, lits: impl Into<Vec<i32>>) {
        self.clauses.push(lits.into());
    }

    /// Excludes `model`-shaped assignments of `vars` from future solves.
    pub fn block(&mut self, lits: impl IntoIterator<Item = i32>) {
        self.clauses.push(lits.into_iter().map(|lit| -lit).collect());
    }

    /// Number of recorded clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Solves the recorded formula, growing the arena as needed.
    pub fn solve(&self) -> Result<SatResult> {
        let mut capacity = self.estimate_cells();
        loop {
            match self.solve_with(capacity) {
                Err(Error::OutOfMemory { .. }) if capacity < MAX_CAPACITY => {
                    capacity = (capacity * 2).min(MAX_CAPACITY);
                }
                outcome => return outcome,
            }
        }
    }

    fn solve_with(&self, capacity: usize) -> Result<SatResult> {
        let mut solver = Solver::new(self.num_vars, capacity)?;
        for clause in &self.clauses {
            solver.add_clause(clause)?;
        }
        solver.solve()
    }

    /// Base structures plus stored clauses, with headroom for lemmas.
    fn estimate_cells(&self) -> usize {
        let base = 12 * (self.num_vars as usize + 1);
        let stored: usize = self.clauses.iter().map(|c| c.len() + 4).sum();
        (base + 2 * stored + 1024).min(MAX_CAPACITY)
    }
}
