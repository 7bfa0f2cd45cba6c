//! The component-generator capability and stock scalar generators.

use crate::data::{Size, Source};
use crate::error::{MapcheckError, Result};
use crate::shrink::halving;

/// A generator for test data of type `Value`.
///
/// Generators are explicit, first-class values: a composite generator holds
/// its component generators directly rather than discovering them by type.
/// Every generator carries three capabilities — randomized generation,
/// production of smaller candidate values, and a numeric complexity score
/// used by a shrink-search driver to rank candidates.
pub trait Generator {
    type Value;

    /// Produce a random value bounded by the given budget.
    fn generate(&self, source: &mut Source, budget: Size) -> Self::Value;

    /// Produce candidate values no larger than `value`.
    ///
    /// One pass only: callers re-invoke on a chosen candidate to continue
    /// shrinking. An empty result means the value is already minimal.
    fn shrink(&self, source: &mut Source, value: &Self::Value) -> Vec<Self::Value>;

    /// Non-negative complexity score for ranking shrink candidates.
    fn magnitude(&self, value: &Self::Value) -> f64;
}

/// A boxed generator, as handed out by the registry.
pub type BoxedGenerator<T> = Box<dyn Generator<Value = T>>;

impl<T> Generator for Box<dyn Generator<Value = T>> {
    type Value = T;

    fn generate(&self, source: &mut Source, budget: Size) -> T {
        (**self).generate(source, budget)
    }

    fn shrink(&self, source: &mut Source, value: &T) -> Vec<T> {
        (**self).shrink(source, value)
    }

    fn magnitude(&self, value: &T) -> f64 {
        (**self).magnitude(value)
    }
}

/// A generator that always produces the same value.
///
/// Constants are already minimal and carry no complexity.
pub struct Constant<T>(pub T);

impl<T: Clone> Generator for Constant<T> {
    type Value = T;

    fn generate(&self, _source: &mut Source, _budget: Size) -> T {
        self.0.clone()
    }

    fn shrink(&self, _source: &mut Source, _value: &T) -> Vec<T> {
        Vec::new()
    }

    fn magnitude(&self, _value: &T) -> f64 {
        0.0
    }
}

/// Uniform integers in an inclusive range, shrinking toward zero.
pub struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    /// Create a generator for the inclusive range `[min, max]`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(MapcheckError::InvalidGenerator {
                message: format!("empty integer range [{min}, {max}]"),
            });
        }
        Ok(IntRange { min, max })
    }

    /// The full `i64` range.
    pub fn full() -> Self {
        IntRange {
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    /// The in-range value closest to zero; shrinks converge on it.
    fn origin(&self) -> i64 {
        0.clamp(self.min, self.max)
    }
}

impl Generator for IntRange {
    type Value = i64;

    fn generate(&self, source: &mut Source, _budget: Size) -> i64 {
        let span = self.max.wrapping_sub(self.min) as u64;
        if span == u64::MAX {
            return source.next_u64() as i64;
        }
        self.min.wrapping_add(source.next_bounded(span + 1) as i64)
    }

    fn shrink(&self, _source: &mut Source, value: &i64) -> Vec<i64> {
        // Jump to the origin first, then approach the value by halving the
        // remaining distance.
        let origin = self.origin();
        let mut shrinks = Vec::new();
        let mut delta = value - origin;
        while delta != 0 {
            shrinks.push(value - delta);
            delta /= 2;
        }
        shrinks
    }

    fn magnitude(&self, value: &i64) -> f64 {
        value.unsigned_abs() as f64
    }
}

/// Uniform booleans; `true` shrinks to `false`.
pub struct Bool;

impl Generator for Bool {
    type Value = bool;

    fn generate(&self, source: &mut Source, _budget: Size) -> bool {
        source.next_bool()
    }

    fn shrink(&self, _source: &mut Source, value: &bool) -> Vec<bool> {
        if *value {
            vec![false]
        } else {
            Vec::new()
        }
    }

    fn magnitude(&self, value: &bool) -> f64 {
        if *value {
            1.0
        } else {
            0.0
        }
    }
}

/// Lowercase ASCII words with budget-bounded length.
///
/// Shrinks drop halving-sized suffixes, so a long word falls toward the
/// empty string in a few steps.
pub struct AsciiWord;

impl Generator for AsciiWord {
    type Value = String;

    fn generate(&self, source: &mut Source, budget: Size) -> String {
        let len = source.next_usize(0, budget.get());
        (0..len)
            .map(|_| (b'a' + source.next_bounded(26) as u8) as char)
            .collect()
    }

    fn shrink(&self, _source: &mut Source, value: &String) -> Vec<String> {
        let len = value.chars().count();
        halving(len)
            .map(|cut| value.chars().take(len - cut).collect())
            .collect()
    }

    fn magnitude(&self, value: &String) -> f64 {
        value.chars().count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_generates_and_never_shrinks() {
        let gen = Constant("fixed");
        let mut source = Source::from_u64(1);
        assert_eq!(gen.generate(&mut source, Size::new(10)), "fixed");
        assert!(gen.shrink(&mut source, &"fixed").is_empty());
        assert_eq!(gen.magnitude(&"fixed"), 0.0);
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_int_range_rejects_empty_range() {
        assert!(matches!(
            IntRange::new(3, 1),
            Err(MapcheckError::InvalidGenerator { .. })
        ));
    }

    #[test]
    fn test_int_range_stays_in_bounds() {
        let gen = IntRange::new(-5, 5).unwrap();
        let mut source = Source::from_u64(99);
        for _ in 0..500 {
            let n = gen.generate(&mut source, Size::new(0));
            assert!((-5..=5).contains(&n));
        }
    }

    #[test]
    fn test_int_shrinks_toward_zero() {
        let gen = IntRange::new(-100, 100).unwrap();
        let mut source = Source::from_u64(0);
        let shrinks = gen.shrink(&mut source, &10);
        assert_eq!(shrinks, vec![0, 5, 8, 9]);
        assert!(gen.shrink(&mut source, &0).is_empty());
    }

    #[test]
    fn test_int_shrinks_toward_positive_min() {
        let gen = IntRange::new(3, 100).unwrap();
        let mut source = Source::from_u64(0);
        let shrinks = gen.shrink(&mut source, &7);
        assert_eq!(shrinks, vec![3, 5, 6]);
    }

    #[test]
    fn test_ascii_word_respects_budget() {
        let gen = AsciiWord;
        let mut source = Source::from_u64(5);
        for _ in 0..100 {
            let word = gen.generate(&mut source, Size::new(8));
            assert!(word.len() <= 8);
            assert!(word.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_ascii_word_shrinks_shorter() {
        let gen = AsciiWord;
        let mut source = Source::from_u64(0);
        let shrinks = gen.shrink(&mut source, &"abcd".to_string());
        assert_eq!(shrinks, vec!["", "ab", "abc"]);
    }
}
