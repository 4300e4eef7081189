//! Core CDCL solver: clause intake, the search driver, and model queries.

use crate::arena::Arena;
use crate::bcp::WatchLists;
use crate::clause_db::ClauseDb;
use crate::conflict::ConflictAnalyzer;
use crate::decision::DecisionEngine;
use crate::heuristics::{RestartSchedule, VsidsScores};
use crate::trail::Trail;
use perigee_base::{Error, Result};
use serde::{Deserialize, Serialize};

/// The result of a SAT solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// Satisfiable, with a total assignment.
    Sat(Model),
    /// Unsatisfiable.
    Unsat,
}

impl SatResult {
    /// True on the SAT outcome.
    #[must_use]
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    /// The model, if satisfiable.
    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Sat(model) => Some(model),
            Self::Unsat => None,
        }
    }
}

/// A total assignment over variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Value of `var` (1-based); false for variables outside the range.
    #[must_use]
    pub fn value(&self, var: u32) -> bool {
        (var as usize)
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Number of variables in the model.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// The assignment as signed DIMACS-style literals, `1..=num_vars`.
    pub fn lits(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| {
            let var = i as i32 + 1;
            if v {
                var
            } else {
                -var
            }
        })
    }
}

/// Configuration for the CDCL engine.
#[derive(Debug, Clone)]
pub struct CdclConfig {
    /// VSIDS decay factor per conflict.
    pub var_decay: f64,
    /// Conflicts per Luby restart unit.
    pub restart_unit: u64,
    /// Learned clauses tolerated before the first reduction.
    pub reduce_base: usize,
    /// Growth of the reduction limit after each reduction.
    pub reduce_step: usize,
}

impl Default for CdclConfig {
    fn default() -> Self {
        Self {
            var_decay: 0.95,
            restart_unit: 128,
            reduce_base: 2000,
            reduce_step: 300,
        }
    }
}

/// Search counters, cumulative over the solver's lifetime.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    /// Decision literals picked.
    pub decisions: u64,
    /// Conflicts hit during propagation.
    pub conflicts: u64,
    /// Assignments forced by unit propagation.
    pub propagations: u64,
    /// Luby restarts performed.
    pub restarts: u64,
    /// Clauses learned from conflicts.
    pub learned: u64,
    /// Learned-clause reduction passes.
    pub reductions: u64,
}

/// The CDCL solver.
///
/// Feed clauses with [`Solver::add_unit`] / [`Solver::add_clause`], then call
/// [`Solver::solve`]. Intake is sealed by the first `solve()`; enumerating
/// further models means rebuilding the solver with a blocking clause added.
pub struct Solver {
    num_vars: usize,
    arena: Arena,
    trail: Trail,
    watches: WatchLists,
    db: ClauseDb,
    analyzer: ConflictAnalyzer,
    decision: DecisionEngine,
    scores: VsidsScores,
    restarts: RestartSchedule,
    stats: SolverStats,
    scratch: Vec<i32>,
    unsat: bool,
    sealed: bool,
}

impl Solver {
    /// Creates a solver for variables `1..=num_vars` over an arena of
    /// `capacity` cells.
    ///
    /// Fails with `OutOfMemory` when the capacity cannot hold the base
    /// structures for `num_vars`.
    pub fn new(num_vars: u32, capacity: usize) -> Result<Self> {
        Self::with_config(num_vars, capacity, CdclConfig::default())
    }

    /// Creates a solver with custom configuration.
    pub fn with_config(num_vars: u32, capacity: usize, config: CdclConfig) -> Result<Self> {
        let num_vars = num_vars as usize;
        let mut arena = Arena::new(capacity)?;
        arena.alloc(1)?; // guard cell, so offset 0 can serve as the null handle
        let trail = Trail::new(&mut arena, num_vars)?;
        let watches = WatchLists::new(&mut arena, num_vars)?;
        let analyzer = ConflictAnalyzer::new(&mut arena, num_vars)?;
        let db = ClauseDb::new(&arena, config.reduce_base, config.reduce_step);
        Ok(Self {
            num_vars,
            arena,
            trail,
            watches,
            db,
            analyzer,
            decision: DecisionEngine::new(num_vars),
            scores: VsidsScores::new(num_vars, config.var_decay),
            restarts: RestartSchedule::new(config.restart_unit),
            stats: SolverStats::default(),
            scratch: Vec::new(),
            unsat: false,
            sealed: false,
        })
    }

    /// Records a unit clause: `lit` holds in every model.
    ///
    /// Applied immediately as a permanent assignment; a contradiction with an
    /// earlier top-level assignment puts the solver in its terminal UNSAT
    /// state.
    pub fn add_unit(&mut self, lit: i32) -> Result<()> {
        self.check_open()?;
        self.check_literal(lit)?;
        self.enqueue_unit(lit);
        Ok(())
    }

    /// Records a clause, the disjunction of `lits`.
    ///
    /// Duplicate literals are merged, a clause containing complementary
    /// literals is dropped silently, a single-literal clause takes the unit
    /// path, and the empty clause makes the formula unsatisfiable.
    pub fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        self.check_open()?;
        for &lit in lits {
            self.check_literal(lit)?;
        }
        if lits.is_empty() {
            self.unsat = true;
            return Ok(());
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(lits);
        self.scratch.sort_unstable_by_key(|l| (l.unsigned_abs(), *l < 0));
        self.scratch.dedup();
        if self.scratch.windows(2).any(|pair| pair[0] == -pair[1]) {
            return Ok(()); // tautology
        }
        if self.scratch.len() == 1 {
            let lit = self.scratch[0];
            self.enqueue_unit(lit);
            return Ok(());
        }

        let handle = self.db.store_input(&mut self.arena, &self.scratch)?;
        self.watches.attach(&mut self.arena, self.scratch[0], handle, 0);
        self.watches.attach(&mut self.arena, self.scratch[1], handle, 1);
        Ok(())
    }

    /// Decides satisfiability.
    ///
    /// Runs to termination or to `OutOfMemory`; there is no partial result.
    /// The first call seals clause intake.
    pub fn solve(&mut self) -> Result<SatResult> {
        self.sealed = true;
        if self.unsat {
            return Ok(SatResult::Unsat);
        }
        loop {
            let before = self.trail.assigned_len();
            let conflict = self.watches.propagate(&mut self.arena, &mut self.trail);
            self.stats.propagations += (self.trail.assigned_len() - before) as u64;

            if let Some(handle) = conflict {
                self.stats.conflicts += 1;
                if self.trail.current_level() == 0 {
                    self.unsat = true;
                    tracing::debug!(conflicts = self.stats.conflicts, "conflict at level 0");
                    return Ok(SatResult::Unsat);
                }
                let (blevel, len) = self.analyzer.analyze(
                    &mut self.arena,
                    &self.trail,
                    &self.db,
                    &mut self.scores,
                    handle,
                );
                self.trail.backjump(&mut self.arena, blevel);
                self.commit_learned(len)?;
                self.scores.decay();

                if self.restarts.on_conflict() && self.trail.current_level() > 0 {
                    self.stats.restarts += 1;
                    tracing::debug!(restarts = self.stats.restarts, "restarting");
                    self.trail.backjump(&mut self.arena, 0);
                }
                if self.db.should_reduce() {
                    let removed = self.db.reduce(&mut self.arena, &self.trail, &self.watches);
                    self.stats.reductions += 1;
                    tracing::debug!(removed, live = self.db.num_learned(), "reduced clause database");
                }
            } else {
                match self.decision.pick(&self.arena, &self.trail, &self.scores) {
                    Some(var) => {
                        self.stats.decisions += 1;
                        self.trail.new_level(&mut self.arena);
                        let lit = self.decision.phase_lit(&self.arena, &self.trail, var);
                        self.trail.assign(&mut self.arena, lit, 0);
                    }
                    None => return Ok(SatResult::Sat(self.extract_model())),
                }
            }
        }
    }

    /// Value of `var` in the model. Only meaningful after [`Solver::solve`]
    /// returned SAT; false for variables outside `1..=num_vars`.
    #[must_use]
    pub fn query(&self, var: u32) -> bool {
        if var == 0 || var as usize > self.num_vars {
            return false;
        }
        self.trail.value_of(&self.arena, var as usize).unwrap_or(false)
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> u32 {
        self.num_vars as u32
    }

    /// Number of input clauses stored (units and tautologies excluded).
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.db.num_input()
    }

    /// Solver statistics so far.
    #[must_use]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn check_open(&self) -> Result<()> {
        if self.sealed {
            return Err(Error::SolveStarted);
        }
        Ok(())
    }

    fn check_literal(&self, lit: i32) -> Result<()> {
        if lit == 0 || lit.unsigned_abs() as usize > self.num_vars {
            return Err(Error::InvalidLiteral(lit));
        }
        Ok(())
    }

    /// Applies a unit at the top level; contradictions are terminal.
    fn enqueue_unit(&mut self, lit: i32) {
        if self.trail.is_false(&self.arena, lit) {
            self.unsat = true;
        } else if !self.trail.is_true(&self.arena, lit) {
            self.trail.assign(&mut self.arena, lit, 0);
        }
    }

    /// Stores the learned clause assembled by the analyser and asserts its
    /// first literal.
    fn commit_learned(&mut self, len: usize) -> Result<()> {
        self.stats.learned += 1;
        let asserting = self.analyzer.learned_lit(&self.arena, 0);
        if len == 1 {
            // unary lemma: permanent assignment at level 0
            self.trail.assign(&mut self.arena, asserting, 0);
            return Ok(());
        }
        let handle =
            self.db
                .store_learned(&mut self.arena, self.analyzer.buffer_offset(), len)?;
        self.watches.attach(&mut self.arena, asserting, handle, 0);
        let second = self.analyzer.learned_lit(&self.arena, 1);
        self.watches.attach(&mut self.arena, second, handle, 1);
        self.trail.assign(&mut self.arena, asserting, handle as i32);
        Ok(())
    }

    fn extract_model(&self) -> Model {
        let values = (1..=self.num_vars)
            .map(|v| self.trail.value_of(&self.arena, v).unwrap_or(false))
            .collect();
        Model { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_units_skip_search() {
        let mut solver = Solver::new(1, 1 << 10).unwrap();
        solver.add_unit(1).unwrap();
        solver.add_unit(-1).unwrap();
        assert_eq!(solver.solve().unwrap(), SatResult::Unsat);
        assert_eq!(solver.stats().conflicts, 0);
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let mut solver = Solver::new(2, 1 << 10).unwrap();
        solver.add_clause(&[]).unwrap();
        assert_eq!(solver.solve().unwrap(), SatResult::Unsat);
    }

    #[test]
    fn test_intake_sealed_after_solve() {
        let mut solver = Solver::new(1, 1 << 10).unwrap();
        solver.add_unit(1).unwrap();
        solver.solve().unwrap();
        assert!(matches!(solver.add_unit(-1), Err(Error::SolveStarted)));
        assert!(matches!(solver.add_clause(&[1]), Err(Error::SolveStarted)));
    }

    #[test]
    fn test_invalid_literals_rejected() {
        let mut solver = Solver::new(2, 1 << 10).unwrap();
        assert!(matches!(solver.add_unit(0), Err(Error::InvalidLiteral(0))));
        assert!(matches!(solver.add_unit(3), Err(Error::InvalidLiteral(3))));
        assert!(matches!(
            solver.add_clause(&[1, -3]),
            Err(Error::InvalidLiteral(-3))
        ));
    }

    #[test]
    fn test_construct_out_of_memory() {
        assert!(matches!(
            Solver::new(1000, 16),
            Err(Error::OutOfMemory { .. })
        ));
    }

    #[test]
    fn test_query_out_of_range() {
        let mut solver = Solver::new(1, 1 << 10).unwrap();
        solver.add_unit(1).unwrap();
        solver.solve().unwrap();
        assert!(solver.query(1));
        assert!(!solver.query(0));
        assert!(!solver.query(2));
    }
}
