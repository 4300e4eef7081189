//! Variable activity scores and the restart schedule.

/// Renormalization point for the activity table. Only the ordering of
/// scores matters, so the absolute scale is free to be squashed whenever
/// the lazy-decay bump amount runs away toward the end of the `f64` range.
const ACTIVITY_CEILING: f64 = 1e60;

/// VSIDS activity, keyed by the same 1-based variable numbering the trail
/// uses.
///
/// Decay is lazy: rather than shrinking every entry on every conflict, the
/// amount a bump adds grows by `1 / decay`, which yields the same ordering
/// at a fraction of the work. Whichever of the bump amount or a bumped
/// score first reaches [`ACTIVITY_CEILING`] triggers a renormalization of
/// the whole table. Larger score means likelier to be picked next.
pub struct VsidsScores {
    table: Vec<f64>,
    bump_inc: f64,
    decay: f64,
}

impl VsidsScores {
    /// Zeroed activity for variables `1..=num_vars`.
    pub fn new(num_vars: usize, decay: f64) -> Self {
        Self {
            table: vec![0.0; num_vars + 1],
            bump_inc: 1.0,
            decay,
        }
    }

    /// Credits `var` with the current bump amount.
    pub fn bump(&mut self, var: usize) {
        let bumped = self.table[var] + self.bump_inc;
        self.table[var] = bumped;
        if bumped >= ACTIVITY_CEILING {
            self.renormalize();
        }
    }

    /// Ages every score relative to future bumps; called once per conflict.
    pub fn decay(&mut self) {
        self.bump_inc /= self.decay;
        if self.bump_inc >= ACTIVITY_CEILING {
            self.renormalize();
        }
    }

    /// Current activity of `var`.
    pub fn score(&self, var: usize) -> f64 {
        self.table[var]
    }

    /// Squashes the table and the bump amount by a common factor, leaving
    /// the relative ordering untouched.
    fn renormalize(&mut self) {
        let factor = 1.0 / ACTIVITY_CEILING;
        for score in &mut self.table {
            *score *= factor;
        }
        self.bump_inc *= factor;
    }
}

/// The Luby restart series: 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ...
#[derive(Debug, Clone, Default)]
pub struct LubySeries {
    step: u64,
}

impl LubySeries {
    /// Advances the series and returns the next element.
    pub fn next(&mut self) -> u64 {
        self.step += 1;
        let mut x = self.step;
        loop {
            // smallest complete subsequence 2^k - 1 that reaches x
            let mut size = 1u64;
            let mut pow = 1u64;
            while size < x {
                pow <<= 1;
                size = 2 * size + 1;
            }
            if size == x {
                return pow;
            }
            x -= pow - 1;
        }
    }
}

/// Conflict-counting restart trigger driven by the Luby series.
pub struct RestartSchedule {
    series: LubySeries,
    unit: u64,
    threshold: u64,
    conflicts: u64,
}

impl RestartSchedule {
    /// Creates a schedule firing every `unit * luby(i)` conflicts.
    pub fn new(unit: u64) -> Self {
        let mut series = LubySeries::default();
        let threshold = unit * series.next();
        Self {
            series,
            unit,
            threshold,
            conflicts: 0,
        }
    }

    /// Records a conflict; true when a restart is due.
    pub fn on_conflict(&mut self) -> bool {
        self.conflicts += 1;
        if self.conflicts >= self.threshold {
            self.conflicts = 0;
            self.threshold = self.unit * self.series.next();
            true
        } else {
            false
        }
    }
}
