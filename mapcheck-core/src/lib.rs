//! Core generation-and-shrinking engine for mapcheck.
//!
//! This crate provides the keyed-composite generator at the heart of
//! mapcheck: size-bounded random population of associative containers from
//! component generators, and systematic production of smaller candidate
//! values for failure minimization.

pub mod data;
pub mod error;
pub mod gen;
pub mod map;
pub mod registry;
pub mod shrink;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use map::*;
pub use registry::*;
