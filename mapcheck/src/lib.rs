//! mapcheck: generation and shrinking for keyed composite test data.
//!
//! This is the main entry point for the mapcheck library, re-exporting the
//! core engine along with a catalog of ready-made generators.

pub mod catalog;

pub use mapcheck_core::*;
