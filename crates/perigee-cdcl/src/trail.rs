//! Assignment trail and per-variable state.
//!
//! The trail is an append-only run of assigned literals with a parallel
//! record of the trail index at which each decision level began. Decisions
//! and forced assignments are appended the same way; only the boundary
//! record tells them apart. All of it lives in arena regions allocated at
//! construction: truth marks per literal, plus level / reason / saved-phase /
//! seen cells per variable.

use crate::arena::Arena;
use perigee_base::Result;

/// Slot of a literal in the per-literal regions (variables are 1-based).
#[inline]
pub(crate) fn lit_index(lit: i32) -> usize {
    (lit.unsigned_abs() as usize) * 2 + usize::from(lit < 0)
}

/// Assignment state: truth map, trail, decision-level boundaries, and the
/// per-variable level / reason / phase / seen records.
pub struct Trail {
    num_vars: usize,
    truth_off: usize,
    level_off: usize,
    reason_off: usize,
    phase_off: usize,
    seen_off: usize,
    trail_off: usize,
    level_start_off: usize,
    len: usize,
    processed: usize,
    current_level: usize,
}

impl Trail {
    /// Allocates the assignment regions for variables `1..=num_vars`.
    pub fn new(arena: &mut Arena, num_vars: usize) -> Result<Self> {
        let per_lit = 2 * num_vars + 2;
        let per_var = num_vars + 1;
        Ok(Self {
            num_vars,
            truth_off: arena.alloc(per_lit)?,
            level_off: arena.alloc(per_var)?,
            reason_off: arena.alloc(per_var)?,
            phase_off: arena.alloc(per_var)?,
            seen_off: arena.alloc(per_var)?,
            trail_off: arena.alloc(num_vars)?,
            level_start_off: arena.alloc(per_var)?,
            len: 0,
            processed: 0,
            current_level: 0,
        })
    }

    /// True iff `lit` is assigned TRUE.
    #[inline]
    pub fn is_true(&self, arena: &Arena, lit: i32) -> bool {
        arena.get(self.truth_off + lit_index(lit)) != 0
    }

    /// True iff `lit` is assigned FALSE, i.e. its negation is TRUE.
    #[inline]
    pub fn is_false(&self, arena: &Arena, lit: i32) -> bool {
        self.is_true(arena, -lit)
    }

    /// True iff neither polarity of `lit` is assigned.
    #[inline]
    pub fn is_unset(&self, arena: &Arena, lit: i32) -> bool {
        !self.is_true(arena, lit) && !self.is_false(arena, lit)
    }

    /// Current value of a variable, `None` while unassigned.
    pub fn value_of(&self, arena: &Arena, var: usize) -> Option<bool> {
        let lit = var as i32;
        if self.is_true(arena, lit) {
            Some(true)
        } else if self.is_false(arena, lit) {
            Some(false)
        } else {
            None
        }
    }

    /// Appends `lit` as TRUE at the current level.
    ///
    /// `reason` is the handle of the clause that forced the assignment, or 0
    /// for decisions and top-level units.
    pub fn assign(&mut self, arena: &mut Arena, lit: i32, reason: i32) {
        debug_assert!(self.is_unset(arena, lit));
        let var = lit.unsigned_abs() as usize;
        arena.set(self.truth_off + lit_index(lit), 1);
        arena.set(self.level_off + var, self.current_level as i32);
        arena.set(self.reason_off + var, reason);
        arena.set(self.trail_off + self.len, lit);
        self.len += 1;
    }

    /// Next trail literal the propagator has not consumed yet, in FIFO order.
    pub fn next_unprocessed(&mut self, arena: &Arena) -> Option<i32> {
        if self.processed < self.len {
            let lit = arena.get(self.trail_off + self.processed);
            self.processed += 1;
            Some(lit)
        } else {
            None
        }
    }

    /// Opens a new decision level starting at the current trail length.
    pub fn new_level(&mut self, arena: &mut Arena) {
        self.current_level += 1;
        arena.set(self.level_start_off + self.current_level, self.len as i32);
    }

    /// Rolls the trail back to `target` level.
    ///
    /// Every assignment above `target` is cleared, its phase saved for the
    /// decision heuristic. Level-0 assignments are permanent.
    pub fn backjump(&mut self, arena: &mut Arena, target: usize) {
        if target >= self.current_level {
            return;
        }
        let new_len = arena.get(self.level_start_off + target + 1) as usize;
        for i in (new_len..self.len).rev() {
            let lit = arena.get(self.trail_off + i);
            let var = lit.unsigned_abs() as usize;
            arena.set(self.phase_off + var, i32::from(lit > 0));
            arena.set(self.truth_off + lit_index(lit), 0);
            arena.set(self.reason_off + var, 0);
            arena.set(self.level_off + var, 0);
        }
        self.len = new_len;
        self.processed = new_len;
        self.current_level = target;
    }

    /// Decision level at which `var` was assigned.
    #[inline]
    pub fn level_of(&self, arena: &Arena, var: usize) -> usize {
        arena.get(self.level_off + var) as usize
    }

    /// Reason handle for `var`, 0 while it is a decision or unassigned.
    #[inline]
    pub fn reason_of(&self, arena: &Arena, var: usize) -> i32 {
        arena.get(self.reason_off + var)
    }

    /// Last value `var` held before it was unassigned; initially FALSE.
    pub fn saved_phase(&self, arena: &Arena, var: usize) -> bool {
        arena.get(self.phase_off + var) != 0
    }

    /// Conflict-analysis marker for `var`.
    #[inline]
    pub fn seen(&self, arena: &Arena, var: usize) -> bool {
        arena.get(self.seen_off + var) != 0
    }

    #[inline]
    pub fn mark_seen(&self, arena: &mut Arena, var: usize) {
        arena.set(self.seen_off + var, 1);
    }

    #[inline]
    pub fn clear_seen(&self, arena: &mut Arena, var: usize) {
        arena.set(self.seen_off + var, 0);
    }

    /// Literal at trail position `idx`.
    #[inline]
    pub fn trail_lit(&self, arena: &Arena, idx: usize) -> i32 {
        arena.get(self.trail_off + idx)
    }

    /// Trail index at which `level` began.
    pub fn level_start(&self, arena: &Arena, level: usize) -> usize {
        if level == 0 {
            0
        } else {
            arena.get(self.level_start_off + level) as usize
        }
    }

    /// Number of assigned variables.
    #[inline]
    pub fn assigned_len(&self) -> usize {
        self.len
    }

    /// Current decision level.
    #[inline]
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// True when every variable is assigned.
    pub fn all_assigned(&self) -> bool {
        self.len == self.num_vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(num_vars: usize) -> (Arena, Trail) {
        let mut arena = Arena::new(1024).unwrap();
        arena.alloc(1).unwrap(); // guard so 0 stays a null handle
        let trail = Trail::new(&mut arena, num_vars).unwrap();
        (arena, trail)
    }

    #[test]
    fn test_assign_and_value() {
        let (mut arena, mut trail) = setup(3);
        trail.assign(&mut arena, 2, 0);
        trail.assign(&mut arena, -3, 0);
        assert_eq!(trail.value_of(&arena, 2), Some(true));
        assert_eq!(trail.value_of(&arena, 3), Some(false));
        assert_eq!(trail.value_of(&arena, 1), None);
        assert!(trail.is_false(&arena, -2));
        assert!(trail.is_unset(&arena, 1));
    }

    #[test]
    fn test_backjump_restores_prefix() {
        let (mut arena, mut trail) = setup(4);
        trail.assign(&mut arena, 1, 0); // level 0
        trail.new_level(&mut arena);
        trail.assign(&mut arena, 2, 0);
        trail.assign(&mut arena, -3, 7);
        trail.new_level(&mut arena);
        trail.assign(&mut arena, 4, 0);

        trail.backjump(&mut arena, 0);
        assert_eq!(trail.assigned_len(), 1);
        assert_eq!(trail.current_level(), 0);
        assert_eq!(trail.value_of(&arena, 1), Some(true));
        assert_eq!(trail.value_of(&arena, 2), None);
        assert_eq!(trail.reason_of(&arena, 3), 0);
    }

    #[test]
    fn test_backjump_saves_phase() {
        let (mut arena, mut trail) = setup(2);
        assert!(!trail.saved_phase(&arena, 1)); // initially FALSE
        trail.new_level(&mut arena);
        trail.assign(&mut arena, 1, 0);
        trail.assign(&mut arena, -2, 0);
        trail.backjump(&mut arena, 0);
        assert!(trail.saved_phase(&arena, 1));
        assert!(!trail.saved_phase(&arena, 2));
    }

    #[test]
    fn test_fifo_processing() {
        let (mut arena, mut trail) = setup(3);
        trail.assign(&mut arena, 1, 0);
        trail.assign(&mut arena, 2, 0);
        assert_eq!(trail.next_unprocessed(&arena), Some(1));
        assert_eq!(trail.next_unprocessed(&arena), Some(2));
        assert_eq!(trail.next_unprocessed(&arena), None);
        trail.assign(&mut arena, 3, 0);
        assert_eq!(trail.next_unprocessed(&arena), Some(3));
    }
}
