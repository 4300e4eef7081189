//! First-UIP conflict analysis.
//!
//! Starting from the conflicting clause, the analyser resolves backward
//! along the trail against reason clauses until exactly one marked literal
//! of the conflict level remains: the first unique implication point. The
//! learned clause asserts the UIP's negation at the deepest level among its
//! remaining literals.

use crate::arena::Arena;
use crate::clause_db::ClauseDb;
use crate::heuristics::VsidsScores;
use crate::trail::Trail;
use perigee_base::Result;

/// Derives first-UIP learned clauses into an arena assembly buffer.
pub struct ConflictAnalyzer {
    buf_off: usize,
}

impl ConflictAnalyzer {
    /// Allocates the learned-clause assembly buffer (at most one literal per
    /// variable).
    pub fn new(arena: &mut Arena, num_vars: usize) -> Result<Self> {
        Ok(Self {
            buf_off: arena.alloc(num_vars + 1)?,
        })
    }

    /// Analyzes the conflict on `conflict` at the current (non-zero) level.
    ///
    /// Writes the learned clause into the assembly buffer, the asserting
    /// literal in slot 0 and a deepest lower-level literal in slot 1, and
    /// returns `(asserting_level, learned_len)`. Bumps the activity of every
    /// variable met during resolution and the use counter of every clause
    /// folded in.
    pub fn analyze(
        &self,
        arena: &mut Arena,
        trail: &Trail,
        db: &ClauseDb,
        scores: &mut VsidsScores,
        mut conflict: usize,
    ) -> (usize, usize) {
        let current = trail.current_level();
        let mut len = 1; // slot 0 is reserved for the asserting literal
        let mut unresolved = 0; // marked literals still at the conflict level
        let mut index = trail.assigned_len();

        loop {
            db.bump(arena, conflict);
            let mut k = conflict;
            loop {
                let q = arena.get(k);
                if q == 0 {
                    break;
                }
                k += 1;
                let var = q.unsigned_abs() as usize;
                // level-0 literals are universally false; marked ones are
                // already part of the frontier
                if trail.seen(arena, var) || trail.level_of(arena, var) == 0 {
                    continue;
                }
                trail.mark_seen(arena, var);
                scores.bump(var);
                if trail.level_of(arena, var) == current {
                    unresolved += 1;
                } else {
                    arena.set(self.buf_off + len, q);
                    len += 1;
                }
            }

            // most recently assigned marked literal; always at the conflict
            // level, because those sit above every lower level on the trail
            let pivot = loop {
                index -= 1;
                let lit = trail.trail_lit(arena, index);
                if trail.seen(arena, lit.unsigned_abs() as usize) {
                    break lit;
                }
            };
            unresolved -= 1;
            if unresolved == 0 {
                arena.set(self.buf_off, -pivot);
                break;
            }
            conflict = trail.reason_of(arena, pivot.unsigned_abs() as usize) as usize;
        }

        let asserting_level = if len == 1 {
            0
        } else {
            let mut deepest = 1;
            for i in 2..len {
                let vi = arena.get(self.buf_off + i).unsigned_abs() as usize;
                let vd = arena.get(self.buf_off + deepest).unsigned_abs() as usize;
                if trail.level_of(arena, vi) > trail.level_of(arena, vd) {
                    deepest = i;
                }
            }
            arena.swap(self.buf_off + 1, self.buf_off + deepest);
            let second = arena.get(self.buf_off + 1).unsigned_abs() as usize;
            trail.level_of(arena, second)
        };

        // drop the seen marks: learned literals, then the conflict-level
        // suffix of the trail
        for i in 0..len {
            let var = arena.get(self.buf_off + i).unsigned_abs() as usize;
            trail.clear_seen(arena, var);
        }
        for idx in trail.level_start(arena, current)..trail.assigned_len() {
            let var = trail.trail_lit(arena, idx).unsigned_abs() as usize;
            trail.clear_seen(arena, var);
        }

        (asserting_level, len)
    }

    /// Literal `i` of the most recently derived learned clause.
    pub fn learned_lit(&self, arena: &Arena, i: usize) -> i32 {
        arena.get(self.buf_off + i)
    }

    /// Arena offset of the assembly buffer, for storing the learned clause.
    pub fn buffer_offset(&self) -> usize {
        self.buf_off
    }
}
