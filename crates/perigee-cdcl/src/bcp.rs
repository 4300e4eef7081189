//! Boolean constraint propagation over two watched literals.
//!
//! Each literal owns a chain of clauses watching it, threaded through the
//! clauses' own link cells: a chain entry encodes `(handle << 1) | slot`,
//! where `slot` picks which of the clause's two link cells stores the next
//! entry. Heads live in an arena region, entry 0 terminates a chain (offset
//! 0 is a reserved guard cell), registration prepends in O(1), and moving a
//! clause to another literal's chain relinks exactly one cell.

use crate::arena::Arena;
use crate::clause_db::ClauseDb;
use crate::trail::{lit_index, Trail};
use perigee_base::Result;

/// Per-literal watch chains.
pub struct WatchLists {
    heads_off: usize,
    heads_len: usize,
}

impl WatchLists {
    /// Allocates chain heads for every literal over `num_vars` variables.
    pub fn new(arena: &mut Arena, num_vars: usize) -> Result<Self> {
        let heads_len = 2 * num_vars + 2;
        Ok(Self {
            heads_off: arena.alloc(heads_len)?,
            heads_len,
        })
    }

    #[inline]
    fn head_slot(&self, lit: i32) -> usize {
        self.heads_off + lit_index(lit)
    }

    /// Prepends the clause's link cell `slot` to `lit`'s chain.
    pub fn attach(&self, arena: &mut Arena, lit: i32, handle: usize, slot: usize) {
        let entry = ((handle << 1) | slot) as i32;
        let head = self.head_slot(lit);
        arena.set(handle - 2 + slot, arena.get(head));
        arena.set(head, entry);
    }

    /// Rebuilds every chain from the first two literal slots of the live
    /// clauses. Used after reduction discards learned clauses.
    pub fn rebuild(&self, arena: &mut Arena, db: &ClauseDb) {
        for slot in self.heads_off..self.heads_off + self.heads_len {
            arena.set(slot, 0);
        }
        for handle in db.handles(arena) {
            if db.is_deleted(arena, handle) {
                continue;
            }
            let lit0 = arena.get(handle);
            let lit1 = arena.get(handle + 1);
            self.attach(arena, lit0, handle, 0);
            self.attach(arena, lit1, handle, 1);
        }
    }

    /// Runs unit propagation to fixpoint over the unprocessed trail suffix.
    ///
    /// When a literal becomes TRUE, every clause watching its negation is
    /// inspected: satisfied clauses stay put, clauses with a non-FALSE spare
    /// literal are rewatched onto it, unit clauses force their remaining
    /// literal with the clause as reason, and a clause with both watches
    /// FALSE is returned as the conflict.
    pub fn propagate(&self, arena: &mut Arena, trail: &mut Trail) -> Option<usize> {
        while let Some(lit) = trail.next_unprocessed(arena) {
            let false_lit = -lit;
            // `prev_slot` is the arena cell holding the current chain entry,
            // either the chain head or the previous clause's link cell.
            let mut prev_slot = self.head_slot(false_lit);
            let mut entry = arena.get(prev_slot);
            while entry != 0 {
                let handle = (entry >> 1) as usize;
                let cell = handle - 2 + (entry & 1) as usize;
                let next = arena.get(cell);

                // keep "the other" watched literal in the first slot
                if arena.get(handle) == false_lit {
                    arena.swap(handle, handle + 1);
                }
                let first = arena.get(handle);
                if trail.is_true(arena, first) {
                    prev_slot = cell;
                    entry = next;
                    continue;
                }

                // hunt for a non-FALSE replacement among the spare literals
                let mut k = handle + 2;
                let mut rewatched = false;
                loop {
                    let spare = arena.get(k);
                    if spare == 0 {
                        break;
                    }
                    if !trail.is_false(arena, spare) {
                        arena.set(handle + 1, spare);
                        arena.set(k, false_lit);
                        arena.set(prev_slot, next);
                        let new_head = self.head_slot(spare);
                        arena.set(cell, arena.get(new_head));
                        arena.set(new_head, entry);
                        rewatched = true;
                        break;
                    }
                    k += 1;
                }
                if rewatched {
                    entry = next;
                    continue;
                }

                if trail.is_unset(arena, first) {
                    trail.assign(arena, first, handle as i32);
                } else {
                    // both watches FALSE
                    return Some(handle);
                }
                prev_slot = cell;
                entry = next;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(num_vars: usize) -> (Arena, Trail, WatchLists, ClauseDb) {
        let mut arena = Arena::new(2048).unwrap();
        arena.alloc(1).unwrap();
        let trail = Trail::new(&mut arena, num_vars).unwrap();
        let watches = WatchLists::new(&mut arena, num_vars).unwrap();
        let db = ClauseDb::new(&arena, 2000, 300);
        (arena, trail, watches, db)
    }

    fn add(
        arena: &mut Arena,
        watches: &WatchLists,
        db: &mut ClauseDb,
        lits: &[i32],
    ) -> usize {
        let handle = db.store_input(arena, lits).unwrap();
        watches.attach(arena, lits[0], handle, 0);
        watches.attach(arena, lits[1], handle, 1);
        handle
    }

    #[test]
    fn test_attach_prepends() {
        let (mut arena, _trail, watches, mut db) = setup(3);
        let a = add(&mut arena, &watches, &mut db, &[1, 2]);
        let b = add(&mut arena, &watches, &mut db, &[1, 3]);
        // literal 1's chain: b first (prepended), then a
        let head = arena.get(watches.head_slot(1));
        assert_eq!(head as usize, b << 1);
        let next = arena.get(b - 2);
        assert_eq!(next as usize, a << 1);
        assert_eq!(arena.get(a - 2), 0);
    }

    #[test]
    fn test_propagate_forces_chain() {
        let (mut arena, mut trail, watches, mut db) = setup(3);
        add(&mut arena, &watches, &mut db, &[1, 2]);
        add(&mut arena, &watches, &mut db, &[-2, 3]);

        trail.assign(&mut arena, -1, 0);
        assert_eq!(watches.propagate(&mut arena, &mut trail), None);
        assert_eq!(trail.value_of(&arena, 2), Some(true));
        assert_eq!(trail.value_of(&arena, 3), Some(true));
        // forced assignments record their reasons
        assert_ne!(trail.reason_of(&arena, 2), 0);
        assert_ne!(trail.reason_of(&arena, 3), 0);
    }

    #[test]
    fn test_propagate_rewatches_spare_literal() {
        let (mut arena, mut trail, watches, mut db) = setup(3);
        let c = add(&mut arena, &watches, &mut db, &[1, 2, 3]);

        trail.assign(&mut arena, -1, 0);
        assert_eq!(watches.propagate(&mut arena, &mut trail), None);
        // nothing forced, the clause now watches 3 instead of 1
        assert_eq!(trail.value_of(&arena, 2), None);
        assert_eq!((arena.get(watches.head_slot(3)) >> 1) as usize, c);
    }

    #[test]
    fn test_propagate_reports_conflict() {
        let (mut arena, mut trail, watches, mut db) = setup(2);
        let a = add(&mut arena, &watches, &mut db, &[1, 2]);
        add(&mut arena, &watches, &mut db, &[1, -2]);

        // literal 1's chain is visited newest-first, so the second clause
        // forces -2 and the first one then has both watches false
        trail.assign(&mut arena, -1, 0);
        assert_eq!(watches.propagate(&mut arena, &mut trail), Some(a));
    }
}
