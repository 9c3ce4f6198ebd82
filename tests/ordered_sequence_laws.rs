//! Property-based tests for OrderedSequence and PriorityQueue.
//!
//! Every operation is checked against a sorted `Vec` model.

use std::collections::BTreeMap;

use finger_collections::persistent::{Bias, OrderedSequence, PriorityQueue};
use proptest::prelude::*;

// =============================================================================
// Strategy for generating OrderedSequence
// =============================================================================

/// Generates keys drawn from a small range so duplicates are common.
fn keys_strategy(max_size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50..50_i32, 0..max_size)
}

fn sorted(keys: &[i32]) -> Vec<i32> {
    let mut keys = keys.to_vec();
    keys.sort_unstable();
    keys
}

fn keys_of(sequence: &OrderedSequence<i32>) -> Vec<i32> {
    sequence.iter().copied().collect()
}

fn multiplicities(keys: &[i32]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(*key).or_insert(0) += 1;
    }
    counts
}

proptest! {
    // =========================================================================
    // Ordering Properties
    // =========================================================================

    #[test]
    fn prop_collect_sorts(keys in keys_strategy(200)) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        prop_assert_eq!(keys_of(&sequence), sorted(&keys));
        prop_assert_eq!(sequence.len(), keys.len());
    }

    #[test]
    fn prop_repeated_insert_sorts(keys in keys_strategy(200)) {
        let sequence = keys
            .iter()
            .fold(OrderedSequence::new(), |sequence, key| sequence.insert(*key));
        prop_assert_eq!(keys_of(&sequence), sorted(&keys));
    }

    #[test]
    fn prop_min_and_max_are_extremes(keys in keys_strategy(200)) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        prop_assert_eq!(sequence.min(), keys.iter().min());
        prop_assert_eq!(sequence.max(), keys.iter().max());
    }

    // =========================================================================
    // Search Properties
    // =========================================================================

    #[test]
    fn prop_contains_matches_model(keys in keys_strategy(100), probe in -60..60_i32) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        prop_assert_eq!(sequence.contains(&probe), keys.contains(&probe));
    }

    #[test]
    fn prop_least_greater_or_equal_matches_model(keys in keys_strategy(100), probe in -60..60_i32) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        let expected = sorted(&keys).into_iter().find(|key| *key >= probe);
        prop_assert_eq!(sequence.least_greater_or_equal(&probe).copied(), expected);
    }

    #[test]
    fn prop_split_partitions_by_bias(keys in keys_strategy(150), probe in -60..60_i32) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        let model = sorted(&keys);

        let (below, rest) = sequence.split(&probe, Bias::Right);
        prop_assert_eq!(keys_of(&below), model.iter().copied().filter(|key| *key < probe).collect::<Vec<_>>());
        prop_assert_eq!(keys_of(&rest), model.iter().copied().filter(|key| *key >= probe).collect::<Vec<_>>());

        let (upto, above) = sequence.split(&probe, Bias::Left);
        prop_assert_eq!(keys_of(&upto), model.iter().copied().filter(|key| *key <= probe).collect::<Vec<_>>());
        prop_assert_eq!(keys_of(&above), model.iter().copied().filter(|key| *key > probe).collect::<Vec<_>>());
    }

    #[test]
    fn prop_split_three_isolates_equal_keys(keys in keys_strategy(150), probe in -60..60_i32) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        let (less, equal, greater) = sequence.split_three(&probe);

        prop_assert!(less.iter().all(|key| *key < probe));
        prop_assert!(equal.iter().all(|key| *key == probe));
        prop_assert!(greater.iter().all(|key| *key > probe));
        prop_assert_eq!(equal.len(), keys.iter().filter(|key| **key == probe).count());
        prop_assert_eq!(less.merge(&equal).merge(&greater), sequence);
    }

    #[test]
    fn prop_remove_all_drops_only_matching_keys(keys in keys_strategy(150), probe in -60..60_i32) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        let expected: Vec<i32> = sorted(&keys).into_iter().filter(|key| *key != probe).collect();
        prop_assert_eq!(keys_of(&sequence.remove_all(&probe)), expected);
    }

    #[test]
    fn prop_extract_one_removes_a_single_copy(keys in keys_strategy(150), probe in -60..60_i32) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        match sequence.extract_one(&probe) {
            Some((found, rest)) => {
                prop_assert_eq!(*found, probe);
                prop_assert_eq!(rest.len() + 1, sequence.len());
                prop_assert!(sequence.contains(&probe));
            }
            None => prop_assert!(!sequence.contains(&probe)),
        }
    }

    // =========================================================================
    // Merge and Intersect Properties
    // =========================================================================

    #[test]
    fn prop_merge_is_sorted_union_with_multiplicity(
        left_keys in keys_strategy(150),
        right_keys in keys_strategy(150),
    ) {
        let left: OrderedSequence<i32> = left_keys.iter().copied().collect();
        let right: OrderedSequence<i32> = right_keys.iter().copied().collect();
        let mut expected: Vec<i32> = left_keys.iter().chain(&right_keys).copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(keys_of(&left.merge(&right)), expected);
    }

    #[test]
    fn prop_merge_commutes_on_keys(left_keys in keys_strategy(100), right_keys in keys_strategy(100)) {
        let left: OrderedSequence<i32> = left_keys.iter().copied().collect();
        let right: OrderedSequence<i32> = right_keys.iter().copied().collect();
        prop_assert_eq!(left.merge(&right), right.merge(&left));
    }

    #[test]
    fn prop_intersect_keeps_minimum_multiplicity(
        left_keys in keys_strategy(150),
        right_keys in keys_strategy(150),
    ) {
        let left: OrderedSequence<i32> = left_keys.iter().copied().collect();
        let right: OrderedSequence<i32> = right_keys.iter().copied().collect();

        let right_counts = multiplicities(&right_keys);
        let expected: Vec<i32> = multiplicities(&left_keys)
            .into_iter()
            .flat_map(|(key, count)| {
                let shared = count.min(right_counts.get(&key).copied().unwrap_or(0));
                std::iter::repeat_n(key, shared)
            })
            .collect();

        prop_assert_eq!(keys_of(&left.intersect(&right)), expected);
    }

    #[test]
    fn prop_intersect_with_self_is_identity(keys in keys_strategy(150)) {
        let sequence: OrderedSequence<i32> = keys.iter().copied().collect();
        prop_assert_eq!(sequence.intersect(&sequence), sequence);
    }

    // =========================================================================
    // PriorityQueue Properties
    // =========================================================================

    #[test]
    fn prop_queue_pops_in_sorted_order(keys in keys_strategy(200)) {
        let queue = keys.iter().fold(PriorityQueue::new(), |queue, key| queue.push(*key));
        let mut drained = Vec::new();
        let mut current = queue;
        while let Some((minimum, rest)) = current.pop() {
            drained.push(*minimum);
            current = rest;
        }
        prop_assert_eq!(drained, sorted(&keys));
    }

    #[test]
    fn prop_queue_peek_is_minimum(keys in keys_strategy(100)) {
        let queue: PriorityQueue<i32> = keys.iter().copied().collect();
        prop_assert_eq!(queue.peek(), keys.iter().min());
    }
}
