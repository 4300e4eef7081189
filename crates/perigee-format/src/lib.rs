//! # perigee-format
//!
//! File formats for Perigee.
//!
//! Supports:
//! - **DIMACS CNF**: the standard SAT competition format, read and written
//! - **CnfWriter**: an intake-compatible collector that writes DIMACS files
//!   instead of solving

pub mod dimacs;
pub mod writer;

pub use dimacs::DimacsCnf;
pub use writer::CnfWriter;
