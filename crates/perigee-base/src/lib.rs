//! # perigee-base
//!
//! Foundation crate for the Perigee SAT solver.
//!
//! Provides the pieces every other Perigee crate builds on:
//!
//! - **Error Types**: the unified [`Error`] enum and [`Result`] alias
//! - **Utilities**: a deterministic PRNG for tests and benchmarks

pub mod error;
pub mod utils;

pub use error::{Error, Result};
