//! Clause storage inside the arena.
//!
//! A stored clause is the cell run `[header, link0, link1, lit0, lit1, ...,
//! 0]`; its handle addresses `lit0`, so the two watch-link cells sit at
//! `handle - 2` and `handle - 1` and the header at `handle - 3`. The zero
//! sentinel terminates the literal run, which is why zero is rejected as a
//! literal at intake.
//!
//! The header cell encodes clause state: `-1` for input clauses, a positive
//! use counter for live learned clauses, `0` for learned clauses discarded
//! by reduction. Input clauses are never discarded. Discarded clauses keep
//! their cells (the arena only grows); they are simply dropped from every
//! watch chain when the chains are rebuilt.

use crate::arena::Arena;
use crate::bcp::WatchLists;
use crate::trail::Trail;
use perigee_base::Result;

/// Header value marking an input (permanent) clause.
const HEADER_INPUT: i32 = -1;
/// Header value marking a learned clause discarded by reduction.
const HEADER_DELETED: i32 = 0;

/// The clause database: input and learned clauses appended to the arena.
pub struct ClauseDb {
    clauses_start: usize,
    num_input: usize,
    num_learned: usize,
    reduce_limit: usize,
    reduce_step: usize,
}

impl ClauseDb {
    /// Creates a database whose clauses begin at the current high-water mark.
    pub fn new(arena: &Arena, reduce_limit: usize, reduce_step: usize) -> Self {
        Self {
            clauses_start: arena.used(),
            num_input: 0,
            num_learned: 0,
            reduce_limit,
            reduce_step,
        }
    }

    /// Appends an input clause and returns its handle.
    pub fn store_input(&mut self, arena: &mut Arena, lits: &[i32]) -> Result<usize> {
        let handle = self.alloc_clause(arena, lits.len(), HEADER_INPUT)?;
        for (i, &lit) in lits.iter().enumerate() {
            arena.set(handle + i, lit);
        }
        self.num_input += 1;
        Ok(handle)
    }

    /// Appends a learned clause read out of an arena buffer.
    pub fn store_learned(&mut self, arena: &mut Arena, src: usize, len: usize) -> Result<usize> {
        let handle = self.alloc_clause(arena, len, 1)?;
        for i in 0..len {
            let lit = arena.get(src + i);
            arena.set(handle + i, lit);
        }
        self.num_learned += 1;
        Ok(handle)
    }

    fn alloc_clause(&self, arena: &mut Arena, len: usize, header: i32) -> Result<usize> {
        // header + two link cells + literals + sentinel
        let off = arena.alloc(len + 4)?;
        arena.set(off, header);
        Ok(off + 3)
    }

    /// True iff the clause is a live learned clause.
    pub fn is_learned(&self, arena: &Arena, handle: usize) -> bool {
        arena.get(handle - 3) > 0
    }

    /// True iff the clause was discarded by reduction.
    pub fn is_deleted(&self, arena: &Arena, handle: usize) -> bool {
        arena.get(handle - 3) == HEADER_DELETED
    }

    /// Counts one more use of a learned clause in conflict analysis.
    pub fn bump(&self, arena: &mut Arena, handle: usize) {
        let uses = arena.get(handle - 3);
        if uses > 0 {
            arena.set(handle - 3, uses.saturating_add(1));
        }
    }

    /// Number of literals in the clause.
    pub fn clause_len(&self, arena: &Arena, handle: usize) -> usize {
        let mut len = 0;
        while arena.get(handle + len) != 0 {
            len += 1;
        }
        len
    }

    /// Handles of every stored clause, deleted ones included, in insertion
    /// order.
    pub fn handles(&self, arena: &Arena) -> Vec<usize> {
        let mut handles = Vec::with_capacity(self.num_input + self.num_learned);
        let mut off = self.clauses_start;
        let end = arena.used();
        while off < end {
            let handle = off + 3;
            let len = self.clause_len(arena, handle);
            handles.push(handle);
            off = handle + len + 1;
        }
        handles
    }

    /// Number of input clauses.
    pub fn num_input(&self) -> usize {
        self.num_input
    }

    /// Number of live learned clauses.
    pub fn num_learned(&self) -> usize {
        self.num_learned
    }

    /// True when the learned clauses have outgrown the current limit.
    pub fn should_reduce(&self) -> bool {
        self.num_learned >= self.reduce_limit
    }

    /// Discards roughly half of the learned clauses, preferring rarely used
    /// and long ones, then rebuilds every watch chain from the survivors.
    ///
    /// Input clauses and clauses currently serving as a reason are kept.
    /// Returns the number of clauses discarded.
    pub fn reduce(&mut self, arena: &mut Arena, trail: &Trail, watches: &WatchLists) -> usize {
        // (uses, size, handle); reason clauses keep their forced literal in
        // slot 0 while the assignment stands, so the protection check is O(1)
        let mut candidates: Vec<(i32, usize, usize)> = Vec::new();
        for handle in self.handles(arena) {
            if !self.is_learned(arena, handle) {
                continue;
            }
            let forced_var = arena.get(handle).unsigned_abs() as usize;
            if trail.reason_of(arena, forced_var) == handle as i32 {
                continue;
            }
            let uses = arena.get(handle - 3);
            candidates.push((uses, self.clause_len(arena, handle), handle));
        }
        candidates.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
        let discard = candidates.len() / 2;
        for &(_, _, handle) in &candidates[..discard] {
            arena.set(handle - 3, HEADER_DELETED);
            self.num_learned -= 1;
        }
        watches.rebuild(arena, self);
        self.reduce_limit += self.reduce_step;
        discard
    }
}
