//! Ready-made generator registrations for common types.
//!
//! # Usage
//!
//! ```rust
//! use mapcheck::*;
//! use mapcheck::catalog;
//!
//! let registry = catalog::default_registry();
//! let keys = registry.resolve::<String>().unwrap();
//! let values = registry.resolve::<i64>().unwrap();
//!
//! let gen = hash_map_of(keys, values);
//! let mut source = Source::from_u64(42);
//! let map = gen.generate(&mut source, Size::new(5));
//! assert!(map.len() <= 5);
//! ```

use mapcheck_core::{AsciiWord, Bool, GeneratorRegistry, IntRange};

/// A registry with generators registered for `bool`, `i64`, and `String`.
pub fn default_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry.register::<bool, _>(|| Box::new(Bool));
    registry.register::<i64, _>(|| Box::new(IntRange::full()));
    registry.register::<String, _>(|| Box::new(AsciiWord));
    registry
}
