//! Decision variable selection.

use crate::arena::Arena;
use crate::heuristics::VsidsScores;
use crate::trail::Trail;

/// Picks decision variables by activity, with saved-phase polarity.
pub struct DecisionEngine {
    num_vars: usize,
}

impl DecisionEngine {
    /// Creates a decision engine over variables `1..=num_vars`.
    pub fn new(num_vars: usize) -> Self {
        Self { num_vars }
    }

    /// The unassigned variable with the highest activity, ties broken toward
    /// the smallest index. `None` when every variable is assigned.
    pub fn pick(&self, arena: &Arena, trail: &Trail, scores: &VsidsScores) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for var in 1..=self.num_vars {
            if !trail.is_unset(arena, var as i32) {
                continue;
            }
            let score = scores.score(var);
            match best {
                Some((_, top)) if top >= score => {}
                _ => best = Some((var, score)),
            }
        }
        best.map(|(var, _)| var)
    }

    /// The decision literal for `var`: its saved phase, initially FALSE.
    pub fn phase_lit(&self, arena: &Arena, trail: &Trail, var: usize) -> i32 {
        if trail.saved_phase(arena, var) {
            var as i32
        } else {
            -(var as i32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(num_vars: usize) -> (Arena, Trail, DecisionEngine) {
        let mut arena = Arena::new(1024).unwrap();
        arena.alloc(1).unwrap();
        let trail = Trail::new(&mut arena, num_vars).unwrap();
        (arena, trail, DecisionEngine::new(num_vars))
    }

    #[test]
    fn test_pick_highest_activity() {
        let (arena, trail, engine) = setup(3);
        let mut scores = VsidsScores::new(3, 0.95);
        scores.bump(2);
        assert_eq!(engine.pick(&arena, &trail, &scores), Some(2));
    }

    #[test]
    fn test_pick_ties_toward_smallest_index() {
        let (arena, trail, engine) = setup(3);
        let scores = VsidsScores::new(3, 0.95);
        assert_eq!(engine.pick(&arena, &trail, &scores), Some(1));
    }

    #[test]
    fn test_pick_skips_assigned() {
        let (mut arena, mut trail, engine) = setup(2);
        let mut scores = VsidsScores::new(2, 0.95);
        scores.bump(1);
        trail.assign(&mut arena, 1, 0);
        assert_eq!(engine.pick(&arena, &trail, &scores), Some(2));
        trail.assign(&mut arena, -2, 0);
        assert_eq!(engine.pick(&arena, &trail, &scores), None);
    }

    #[test]
    fn test_phase_initially_false() {
        let (arena, trail, engine) = setup(2);
        assert_eq!(engine.phase_lit(&arena, &trail, 1), -1);
    }
}
