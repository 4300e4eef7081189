//! Error handling shared by every Perigee crate.

use thiserror::Error;

/// Everything that can go wrong across the Perigee crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The solver arena cannot satisfy an allocation. Recovery is to rebuild
    /// the solver with a larger capacity and feed the clauses again.
    #[error("arena exhausted: {requested} cells requested with {capacity} capacity")]
    OutOfMemory {
        /// Number of cells the failed request asked for.
        requested: usize,
        /// Total cell capacity of the arena.
        capacity: usize,
    },

    /// A literal outside the solver's variable range, or the reserved zero.
    #[error("invalid literal {0}")]
    InvalidLiteral(i32),

    /// Clause intake after `solve()` has run.
    #[error("clause intake is sealed once solve() has been called")]
    SolveStarted,

    /// Malformed input in a file format.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
