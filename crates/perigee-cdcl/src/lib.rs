//! # perigee-cdcl
//!
//! Compact Conflict-Driven Clause-Learning (CDCL) SAT engine.
//!
//! Clauses arrive programmatically through [`Solver::add_unit`] and
//! [`Solver::add_clause`]; [`Solver::solve`] decides satisfiability and, on
//! SAT, exposes a total assignment. Every mutable structure lives in a
//! fixed-capacity integer [`arena::Arena`], so the memory footprint is set at
//! construction and exhaustion surfaces as a recoverable error.
//!
//! Implements:
//! - Two-watched-literal unit propagation over arena-embedded watch chains
//! - First-UIP conflict analysis with non-chronological backjumping
//! - VSIDS decision activity with saved phases
//! - Luby restarts and learned-clause database reduction

pub mod arena;
pub mod bcp;
pub mod clause_db;
pub mod conflict;
pub mod decision;
pub mod heuristics;
pub mod solver;
pub mod trail;

pub use solver::{CdclConfig, Model, SatResult, Solver, SolverStats};
