//! The keyed-composite generator: size-bounded map generation and
//! multi-strategy shrinking.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::data::{Size, SizeRange, Source};
use crate::gen::Generator;
use crate::shrink::{chunk_removals, halving, shrinks_of_one_item};

/// Cap on key draws per generation pass, as a multiple of the target count.
///
/// The pass stops once this many draws have been attempted even if fewer
/// pairs were admitted, so generation terminates when distinctness or the
/// admission hook makes the target unreachable (a key space smaller than
/// the target, say).
const ATTEMPT_MULTIPLIER: usize = 16;

/// An associative container the engine can populate and rebuild.
///
/// Inserting a duplicate key overwrites the previous entry. `entries`
/// clones, so shrink candidates never alias the container they came from.
pub trait KeyedContainer {
    type Key;
    type Val;

    fn insert(&mut self, key: Self::Key, value: Self::Val);
    fn len(&self) -> usize;
    fn entries(&self) -> Vec<(Self::Key, Self::Val)>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash + Clone, V: Clone> KeyedContainer for HashMap<K, V> {
    type Key = K;
    type Val = V;

    fn insert(&mut self, key: K, value: V) {
        HashMap::insert(self, key, value);
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Ord + Clone, V: Clone> KeyedContainer for BTreeMap<K, V> {
    type Key = K;
    type Val = V;

    fn insert(&mut self, key: K, value: V) {
        BTreeMap::insert(self, key, value);
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Resolve the effective target entry count for one generation pass.
///
/// An explicit range overrides the budget scalar: the count is drawn
/// uniformly from it. Called once per pass so the target stays stable
/// across every draw in that pass.
pub fn resolved_count(range: Option<&SizeRange>, source: &mut Source, budget: Size) -> usize {
    match range {
        Some(range) => range.sample(source),
        None => budget.get(),
    }
}

type AdmitFn<K, V> = Box<dyn Fn(&K, &V) -> bool>;

/// Generator for keyed containers, built from a key generator and a value
/// generator.
///
/// The generated container's entry count is bounded by the generation
/// budget, or by an explicit [`SizeRange`] when one is configured.
/// Shrinking combines bulk removal of contiguous entry chunks with
/// per-entry key/value shrinks; every candidate is re-checked against the
/// configured size range and, when enabled, key distinctness.
pub struct MapGen<KG, VG, M>
where
    KG: Generator,
    VG: Generator,
{
    keys: KG,
    values: VG,
    make: Box<dyn Fn() -> M>,
    size_range: Option<SizeRange>,
    distinct: bool,
    admit: Option<AdmitFn<KG::Value, VG::Value>>,
}

impl<KG, VG, M> MapGen<KG, VG, M>
where
    KG: Generator,
    VG: Generator,
{
    /// Create a map generator from its two component generators and a
    /// factory for the empty container.
    pub fn new<F>(keys: KG, values: VG, make: F) -> Self
    where
        F: Fn() -> M + 'static,
    {
        MapGen {
            keys,
            values,
            make: Box::new(make),
            size_range: None,
            distinct: false,
            admit: None,
        }
    }

    /// Bound the entry count by an explicit inclusive range, overriding
    /// the budget scalar.
    pub fn with_size_range(mut self, range: SizeRange) -> Self {
        self.size_range = Some(range);
        self
    }

    /// Require keys attempted within one generation pass to be pairwise
    /// distinct, and discard shrink candidates whose key list repeats.
    pub fn with_distinct_keys(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Restrict which (key, value) pairs may enter the container.
    ///
    /// Applies to generated pairs and to shrunk replacement entries alike;
    /// the default admits everything.
    pub fn with_admission<F>(mut self, admit: F) -> Self
    where
        F: Fn(&KG::Value, &VG::Value) -> bool + 'static,
    {
        self.admit = Some(Box::new(admit));
        self
    }

    fn admits(&self, key: &KG::Value, value: &VG::Value) -> bool {
        self.admit.as_ref().map_or(true, |admit| admit(key, value))
    }

    fn in_size_range(&self, len: usize) -> bool {
        self.size_range.map_or(true, |range| range.contains(len))
    }
}

impl<KG, VG, M> MapGen<KG, VG, M>
where
    KG: Generator,
    VG: Generator,
    KG::Value: Clone + PartialEq,
    VG::Value: Clone,
    M: KeyedContainer<Key = KG::Value, Val = VG::Value>,
{
    /// Rebuild a fresh container from an entry list.
    fn rebuild(&self, entries: &[(KG::Value, VG::Value)]) -> M {
        let mut container = (self.make)();
        for (key, value) in entries {
            container.insert(key.clone(), value.clone());
        }
        container
    }

    /// Bulk-removal candidates: for each chunk size in the halving
    /// sequence, drop each aligned contiguous chunk of entries.
    fn removals(&self, entries: &[(KG::Value, VG::Value)]) -> Vec<M> {
        let mut candidates = Vec::new();
        for chunk in halving(entries.len()) {
            for survivors in chunk_removals(entries, chunk) {
                let rebuilt = self.rebuild(&survivors);
                if self.in_size_range(rebuilt.len()) {
                    candidates.push(rebuilt);
                }
            }
        }
        candidates
    }
}

impl<KG, VG, M> Generator for MapGen<KG, VG, M>
where
    KG: Generator,
    VG: Generator,
    KG::Value: Clone + PartialEq,
    VG::Value: Clone,
    M: KeyedContainer<Key = KG::Value, Val = VG::Value>,
{
    type Value = M;

    fn generate(&self, source: &mut Source, budget: Size) -> M {
        let target = resolved_count(self.size_range.as_ref(), source, budget);
        let mut items = (self.make)();
        if target == 0 {
            return items;
        }

        let cap = target.saturating_mul(ATTEMPT_MULTIPLIER);
        let mut attempted: Vec<KG::Value> = Vec::new();
        let mut admitted = 0;
        let mut attempts = 0;
        while admitted < target && attempts < cap {
            attempts += 1;
            let key = self.keys.generate(source, budget);
            if self.distinct {
                // A repeated key is discarded before any value is drawn.
                if attempted.contains(&key) {
                    continue;
                }
                attempted.push(key.clone());
            }
            let value = self.values.generate(source, budget);
            if !self.admits(&key, &value) {
                continue;
            }
            items.insert(key, value);
            admitted += 1;
        }
        items
    }

    fn shrink(&self, source: &mut Source, larger: &M) -> Vec<M> {
        let entries = larger.entries();

        // Structural shrinks first: dropping whole chunks moves the search
        // toward small containers fastest.
        let mut shrinks = self.removals(&entries);

        let one_entry_candidates = shrinks_of_one_item(
            source,
            &entries,
            |source, (key, value): &(KG::Value, VG::Value)| {
                let mut replacements = Vec::new();
                for smaller in self.keys.shrink(source, key) {
                    replacements.push((smaller, value.clone()));
                }
                for smaller in self.values.shrink(source, value) {
                    replacements.push((key.clone(), smaller));
                }
                replacements.retain(|(k, v)| self.admits(k, v));
                replacements
            },
        );

        for candidate in one_entry_candidates {
            // Distinctness is checked on the entry list, not the rebuilt
            // container, so a key collision cannot hide behind overwrite
            // semantics.
            if self.distinct && !keys_distinct(&candidate) {
                continue;
            }
            let rebuilt = self.rebuild(&candidate);
            if self.in_size_range(rebuilt.len()) {
                shrinks.push(rebuilt);
            }
        }

        shrinks
    }

    fn magnitude(&self, value: &M) -> f64 {
        if value.is_empty() {
            return 0.0;
        }
        let entries = value.entries();
        let key_magnitude: f64 = entries.iter().map(|(k, _)| self.keys.magnitude(k)).sum();
        let value_magnitude: f64 = entries.iter().map(|(_, v)| self.values.magnitude(v)).sum();
        // Key complexity is amplified by entry count; value complexity
        // contributes additively. Existing shrink rankings depend on this
        // exact weighting.
        entries.len() as f64 * key_magnitude + value_magnitude
    }
}

fn keys_distinct<K: PartialEq, V>(entries: &[(K, V)]) -> bool {
    for (index, (key, _)) in entries.iter().enumerate() {
        if entries[..index].iter().any(|(seen, _)| seen == key) {
            return false;
        }
    }
    true
}

/// A [`MapGen`] producing `HashMap`s.
pub fn hash_map_of<KG, VG>(keys: KG, values: VG) -> MapGen<KG, VG, HashMap<KG::Value, VG::Value>>
where
    KG: Generator,
    VG: Generator,
    KG::Value: Eq + Hash + Clone + 'static,
    VG::Value: Clone + 'static,
{
    MapGen::new(keys, values, HashMap::new)
}

/// A [`MapGen`] producing `BTreeMap`s.
pub fn btree_map_of<KG, VG>(keys: KG, values: VG) -> MapGen<KG, VG, BTreeMap<KG::Value, VG::Value>>
where
    KG: Generator,
    VG: Generator,
    KG::Value: Ord + Clone + 'static,
    VG::Value: Clone + 'static,
{
    MapGen::new(keys, values, BTreeMap::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::{AsciiWord, IntRange};

    fn small_map() -> MapGen<IntRange, IntRange, BTreeMap<i64, i64>> {
        btree_map_of(
            IntRange::new(0, 1000).unwrap(),
            IntRange::new(0, 1000).unwrap(),
        )
    }

    #[test]
    fn test_resolved_count_prefers_explicit_range() {
        let range = SizeRange::new(2, 4).unwrap();
        let mut source = Source::from_u64(11);
        for _ in 0..100 {
            let n = resolved_count(Some(&range), &mut source, Size::new(50));
            assert!((2..=4).contains(&n));
        }
        assert_eq!(
            resolved_count(None, &mut source, Size::new(50)),
            50,
            "without a range the budget scalar is the target"
        );
    }

    #[test]
    fn test_zero_target_touches_no_component_generator() {
        let gen = small_map();
        let mut source = Source::from_u64(3);
        let map = gen.generate(&mut source, Size::new(0));
        assert!(map.is_empty());
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let gen = small_map();
        let mut a = Source::from_u64(77);
        let mut b = Source::from_u64(77);
        assert_eq!(
            gen.generate(&mut a, Size::new(6)),
            gen.generate(&mut b, Size::new(6))
        );
        assert_eq!(a.draws(), b.draws());
    }

    #[test]
    fn test_distinct_terminates_on_tiny_key_space() {
        // Two possible keys but a target of 10: the attempt cap must end
        // the pass with at most two entries.
        let gen = btree_map_of(IntRange::new(0, 1).unwrap(), IntRange::new(0, 9).unwrap())
            .with_distinct_keys();
        let mut source = Source::from_u64(5);
        let map = gen.generate(&mut source, Size::new(10));
        assert!(map.len() <= 2);
    }

    #[test]
    fn test_magnitude_of_empty_map_is_zero() {
        let gen = small_map();
        assert_eq!(gen.magnitude(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_magnitude_formula() {
        let gen = btree_map_of(AsciiWord, IntRange::new(0, 100).unwrap());
        let mut map = BTreeMap::new();
        map.insert("ab".to_string(), 7);
        map.insert("cdef".to_string(), 3);
        // len * (|"ab"| + |"cdef"|) + (7 + 3)
        assert_eq!(gen.magnitude(&map), 2.0 * 6.0 + 10.0);
    }

    #[test]
    fn test_magnitude_grows_with_entries() {
        let gen = small_map();
        let mut map = BTreeMap::new();
        let mut previous = gen.magnitude(&map);
        for i in 1..=5 {
            map.insert(i, i);
            let current = gen.magnitude(&map);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_keys_distinct() {
        assert!(keys_distinct::<i32, i32>(&[]));
        assert!(keys_distinct(&[(1, 0), (2, 0), (3, 0)]));
        assert!(!keys_distinct(&[(1, 0), (2, 0), (1, 0)]));
    }

    #[test]
    fn test_shrink_of_empty_map_is_empty() {
        let gen = small_map();
        let mut source = Source::from_u64(0);
        assert!(gen.shrink(&mut source, &BTreeMap::new()).is_empty());
    }
}
