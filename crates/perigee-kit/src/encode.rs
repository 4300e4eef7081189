//! CNF construction gadgets.

/// A clause collector that allocates variables and generates clauses for
/// common cardinality constraints.
pub struct CnfBuilder {
    /// Next variable to allocate, 1-based.
    next_var: u32,
    /// Generated clauses.
    clauses: Vec<Vec<i32>>,
}

impl CnfBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_var: 1,
            clauses: Vec::new(),
        }
    }

    /// Creates a builder with variables `1..=num_vars` pre-declared, for
    /// encoders that compute their own variable numbering.
    #[must_use]
    pub fn with_vars(num_vars: u32) -> Self {
        Self {
            next_var: num_vars + 1,
            clauses: Vec::new(),
        }
    }

    /// Allocates a fresh variable and returns its positive literal.
    pub fn new_var(&mut self) -> i32 {
        self.next_var += 1;
        (self.next_var - 1) as i32
    }

    /// Highest variable in use.
    #[must_use]
    pub fn num_vars(&self) -> u32 {
        self.next_var - 1
    }

    /// Adds a clause.
    pub fn add_clause(&mut self, clause: impl Into<Vec<i32>>) {
        self.clauses.push(clause.into());
    }

    /// Adds a unit clause.
    pub fn add_unit(&mut self, lit: i32) {
        self.clauses.push(vec![lit]);
    }

    // =========================================================================
    // Cardinality gadgets
    // =========================================================================

    /// At least one of `lits` holds.
    pub fn at_least_one(&mut self, lits: &[i32]) {
        self.clauses.push(lits.to_vec());
    }

    /// At most one of `lits` holds (pairwise encoding).
    pub fn at_most_one(&mut self, lits: &[i32]) {
        for (i, &a) in lits.iter().enumerate() {
            for &b in &lits[i + 1..] {
                self.clauses.push(vec![-a, -b]);
            }
        }
    }

    /// Exactly one of `lits` holds.
    pub fn exactly_one(&mut self, lits: &[i32]) {
        self.at_least_one(lits);
        self.at_most_one(lits);
    }

    /// The generated clauses.
    #[must_use]
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }

    /// Consumes the builder and returns its clauses.
    #[must_use]
    pub fn into_clauses(self) -> Vec<Vec<i32>> {
        self.clauses
    }
}

impl Default for CnfBuilder {
    fn default() -> Self {
        Self::new()
    }
}
