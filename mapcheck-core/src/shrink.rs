//! List-shrinking helpers shared by composite generators.

use crate::data::Source;

/// The chunk-size sequence `n, n/2, n/4, ..., 1`.
///
/// Empty for `n = 0`. Driving removals by this sequence shrinks a container
/// toward empty in logarithmically many candidate sizes instead of one
/// element at a time.
pub fn halving(n: usize) -> impl Iterator<Item = usize> {
    std::iter::successors((n > 0).then_some(n), |&chunk| (chunk > 1).then_some(chunk / 2))
}

/// All candidates obtained by deleting one aligned contiguous chunk of
/// exactly `chunk` items: offsets `0, chunk, 2 * chunk, ...`.
///
/// A trailing group shorter than `chunk` is never removed on its own; it is
/// reached by the smaller chunk sizes later in the halving sequence.
pub fn chunk_removals<T: Clone>(items: &[T], chunk: usize) -> Vec<Vec<T>> {
    debug_assert!(chunk > 0);
    let mut removals = Vec::new();
    let mut start = 0;
    while start + chunk <= items.len() {
        let mut survivors = Vec::with_capacity(items.len() - chunk);
        survivors.extend_from_slice(&items[..start]);
        survivors.extend_from_slice(&items[start + chunk..]);
        removals.push(survivors);
        start += chunk;
    }
    removals
}

/// All candidates obtained by replacing exactly one item with one of its
/// shrinks, every other item left unchanged.
///
/// Candidates are grouped by position: all shrinks of item 0 first, then
/// item 1, and so on. Each candidate owns fresh clones of the untouched
/// items.
pub fn shrinks_of_one_item<T, F>(
    source: &mut Source,
    items: &[T],
    mut shrink_item: F,
) -> Vec<Vec<T>>
where
    T: Clone,
    F: FnMut(&mut Source, &T) -> Vec<T>,
{
    let mut candidates = Vec::new();
    for (index, item) in items.iter().enumerate() {
        for replacement in shrink_item(source, item) {
            let mut candidate = items.to_vec();
            candidate[index] = replacement;
            candidates.push(candidate);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halving_sequence() {
        assert_eq!(halving(4).collect::<Vec<_>>(), vec![4, 2, 1]);
        assert_eq!(halving(5).collect::<Vec<_>>(), vec![5, 2, 1]);
        assert_eq!(halving(1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(halving(0).count(), 0);
    }

    #[test]
    fn test_chunk_removals_whole_list() {
        let removals = chunk_removals(&[1, 2, 3, 4], 4);
        assert_eq!(removals, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_chunk_removals_halves() {
        let removals = chunk_removals(&[1, 2, 3, 4], 2);
        assert_eq!(removals, vec![vec![3, 4], vec![1, 2]]);
    }

    #[test]
    fn test_chunk_removals_singles() {
        let removals = chunk_removals(&[1, 2, 3], 1);
        assert_eq!(removals, vec![vec![2, 3], vec![1, 3], vec![1, 2]]);
    }

    #[test]
    fn test_chunk_removals_skips_short_tail() {
        // 5 items, chunks of 2: the trailing single item is never removed.
        let removals = chunk_removals(&[1, 2, 3, 4, 5], 2);
        assert_eq!(removals, vec![vec![3, 4, 5], vec![1, 2, 5]]);
    }

    #[test]
    fn test_shrinks_of_one_item_replaces_single_position() {
        let mut source = Source::from_u64(0);
        let candidates = shrinks_of_one_item(&mut source, &[10, 20], |_, &item| {
            if item > 0 {
                vec![item / 2, 0]
            } else {
                Vec::new()
            }
        });
        assert_eq!(
            candidates,
            vec![vec![5, 20], vec![0, 20], vec![10, 10], vec![10, 0]]
        );
    }
}
