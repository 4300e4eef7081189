//! # perigee-kit
//!
//! High-level clause construction for the Perigee SAT solver.
//!
//! [`CnfBuilder`] allocates fresh variables and provides the cardinality
//! gadgets every grid-puzzle encoder ends up needing; [`AutoSolver`] owns a
//! clause buffer, estimates the arena capacity, and transparently rebuilds
//! the core solver when it runs out of memory or when further models are
//! requested by blocking earlier ones.

pub mod encode;
pub mod solver;

pub use encode::CnfBuilder;
pub use perigee_cdcl::{Model, SatResult};
pub use solver::AutoSolver;
