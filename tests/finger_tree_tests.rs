//! Scenario tests for the finger tree family.
//!
//! Covers the lazily evaluated middle, error reporting at the public
//! boundary and the behavior of the three specializations on concrete
//! inputs.

use std::cell::Cell;

use finger_collections::persistent::{
    Bias, FingerTree, FingerTreeError, OrderedSequence, PriorityQueue, RandomAccessSequence,
};
use finger_collections::typeclass::{Measured, Monoid, Semigroup, Sum};
use rstest::rstest;

// =============================================================================
// Instrumented measure
// =============================================================================

thread_local! {
    static COMBINATIONS: Cell<usize> = const { Cell::new(0) };
}

fn combinations() -> usize {
    COMBINATIONS.with(Cell::get)
}

/// A size measure that counts how often it is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Counted(usize);

impl Semigroup for Counted {
    fn combine(self, other: Self) -> Self {
        COMBINATIONS.with(|count| count.set(count.get() + 1));
        Self(self.0 + other.0)
    }
}

impl Monoid for Counted {
    fn empty() -> Self {
        Self(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Item(u32);

impl Measured<Counted> for Item {
    fn measure(&self) -> Counted {
        Counted(1)
    }
}

fn counted_tree(count: u32) -> FingerTree<Item, Counted> {
    (0..count).fold(FingerTree::new(), |tree, value| tree.append(Item(value)))
}

// =============================================================================
// Laziness
// =============================================================================

#[rstest]
fn forcing_the_middle_happens_once() {
    let tree = counted_tree(1000);

    let before = combinations();
    let first: Vec<*const Item> = tree.iter().map(std::ptr::from_ref).collect();
    let after_first = combinations();
    assert!(after_first > before, "the first traversal evaluates suspended middles");

    let second: Vec<*const Item> = tree.iter().map(std::ptr::from_ref).collect();
    assert_eq!(combinations(), after_first);
    assert_eq!(first, second);
}

#[rstest]
fn clones_share_evaluated_middles() {
    let tree = counted_tree(500);
    let copy = tree.clone();

    let _ = tree.iter().count();
    let after_original = combinations();
    let _ = copy.iter_rev().count();
    assert_eq!(combinations(), after_original);
}

#[rstest]
fn reading_the_measure_never_forces() {
    let tree = counted_tree(1000);
    let before = combinations();
    assert_eq!(tree.measure(), Counted(1000));
    assert_eq!(tree.head(), Ok(&Item(0)));
    assert_eq!(tree.last(), Ok(&Item(999)));
    assert_eq!(combinations(), before);
}

/// Largest number of combinations a repeated `step` costs on any version
/// met while stepping from `tree` down to empty.
fn worst_repeated_cost(
    tree: FingerTree<Item, Counted>,
    step: impl Fn(&FingerTree<Item, Counted>) -> FingerTree<Item, Counted>,
) -> usize {
    let mut worst = 0;
    let mut current = tree;
    while !current.is_empty() {
        let _ = step(&current);
        let before = combinations();
        for _ in 0..10 {
            let _ = step(&current);
        }
        worst = worst.max((combinations() - before) / 10);
        current = step(&current);
    }
    worst
}

#[rstest]
#[case(4096)]
#[case(65536)]
fn repeated_tail_on_one_version_does_constant_work(#[case] count: u32) {
    let worst = worst_repeated_cost(counted_tree(count), |tree| tree.tail().unwrap());
    assert!(worst <= 24, "tail combined {worst} measures on a repeated call");
}

#[rstest]
#[case(4096)]
#[case(65536)]
fn repeated_init_on_one_version_does_constant_work(#[case] count: u32) {
    let tree = (0..count).fold(FingerTree::new(), |tree, value| tree.prepend(Item(value)));
    let worst = worst_repeated_cost(tree, |tree| tree.init().unwrap());
    assert!(worst <= 24, "init combined {worst} measures on a repeated call");
}

#[rstest]
fn draining_after_lazy_rotation_keeps_order() {
    let tree = counted_tree(5000);
    let mut front = Vec::new();
    let mut current = tree.clone();
    while let Some((item, rest)) = current.view_left() {
        front.push(item.0);
        current = rest;
    }
    let mut back = Vec::new();
    let mut current = tree;
    while let Some((item, rest)) = current.view_right().map(|(rest, item)| (item.clone(), rest)) {
        back.push(item.0);
        current = rest;
    }
    assert_eq!(front, (0..5000).collect::<Vec<_>>());
    assert_eq!(back, (0..5000).rev().collect::<Vec<_>>());
}

#[rstest]
fn forcing_preserves_the_sequence() {
    let tree = counted_tree(300);
    let values: Vec<u32> = tree.iter().map(|item| item.0).collect();
    let again: Vec<u32> = tree.iter().map(|item| item.0).collect();
    assert_eq!(values, (0..300).collect::<Vec<_>>());
    assert_eq!(values, again);
}

// =============================================================================
// Errors
// =============================================================================

#[rstest]
#[case::head("head")]
#[case::last("last")]
#[case::tail("tail")]
#[case::init("init")]
fn frontier_operations_on_empty_tree_fail(#[case] operation: &'static str) {
    let tree: FingerTree<Item, Counted> = FingerTree::new();
    let error = match operation {
        "head" => tree.head().map(|_| ()).unwrap_err(),
        "last" => tree.last().map(|_| ()).unwrap_err(),
        "tail" => tree.tail().map(|_| ()).unwrap_err(),
        _ => tree.init().map(|_| ()).unwrap_err(),
    };
    assert_eq!(error, FingerTreeError::EmptyStructure { operation });
}

#[rstest]
fn split_tree_on_empty_tree_fails() {
    let tree: FingerTree<Item, Counted> = FingerTree::new();
    assert!(matches!(
        tree.split_tree(|measure| measure.0 > 0),
        Err(FingerTreeError::EmptyStructure { .. })
    ));
}

#[rstest]
fn errors_render_readable_messages() {
    let sequence: RandomAccessSequence<i32> = (0..3).collect();
    let error = sequence.get(7).unwrap_err();
    assert_eq!(
        error.to_string(),
        "index 7 is out of range for a sequence of length 3"
    );
}

// =============================================================================
// General tree scenarios
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line(&'static str);

impl Measured<Sum<usize>> for Line {
    fn measure(&self) -> Sum<usize> {
        Sum::new(self.0.len() + 1)
    }
}

#[rstest]
fn split_finds_line_containing_offset() {
    let document: FingerTree<Line, Sum<usize>> =
        ["fn main() {", "    run();", "}"].into_iter().map(Line).collect();

    let split = document.split_tree(|offset| offset.0 > 15).unwrap();
    assert_eq!(split.pivot(), &Line("    run();"));
    assert_eq!(split.left().measure(), Sum::new(12));
    assert_eq!(split.right().iter().collect::<Vec<_>>(), vec![&Line("}")]);
}

#[rstest]
fn split_short_circuits() {
    let tree: FingerTree<Line, Sum<usize>> = ["a", "bb"].into_iter().map(Line).collect();

    let (left, right) = tree.split(|offset| offset.0 > 100);
    assert!(left.ptr_eq(&tree));
    assert!(right.is_empty());

    let (left, right) = tree.split(|_| true);
    assert!(left.is_empty());
    assert!(right.ptr_eq(&tree));
}

#[rstest]
fn concatenating_large_trees_keeps_order() {
    let left: FingerTree<Line, Sum<usize>> = std::iter::repeat_n(Line("x"), 700).collect();
    let right: FingerTree<Line, Sum<usize>> = std::iter::repeat_n(Line("yy"), 900).collect();
    let joined = left.concat(&right);

    assert_eq!(joined.measure(), Sum::new(700 * 2 + 900 * 3));
    assert_eq!(joined.iter().filter(|line| line.0 == "x").count(), 700);
    assert_eq!(joined.find(|offset| offset.0 > 1400), Some(&Line("yy")));
    assert_eq!(joined.find(|offset| offset.0 > 1399), Some(&Line("x")));
}

// =============================================================================
// Ordered scenarios
// =============================================================================

#[rstest]
fn from_sorted_with_duplicates_answers_membership() {
    let sequence = OrderedSequence::from_sorted([1, 1, 1, 3, 512]);
    assert!(sequence.contains(&512));
    assert!(sequence.contains(&1));
    assert!(!sequence.contains(&0));
    assert!(!sequence.contains(&4));
}

#[rstest]
fn min_and_max_of_small_set() {
    let sequence: OrderedSequence<i32> = [5, 3, 4].into_iter().collect();
    assert_eq!(sequence.min(), Some(&3));
    assert_eq!(sequence.max(), Some(&5));
}

#[rstest]
fn thousand_sequential_inserts() {
    let sequence = (0..1000).fold(OrderedSequence::new(), |sequence, key| sequence.insert(key));
    assert_eq!(sequence.len(), 1000);
    assert!(sequence.iter().copied().eq(0..1000));
    assert_eq!(sequence.least_greater_or_equal(&500), Some(&500));
    assert_eq!(sequence.at_least(&990).len(), 10);
}

#[rstest]
#[case(Bias::Left, vec![1, 2, 2], vec![3])]
#[case(Bias::Right, vec![1], vec![2, 2, 3])]
fn bias_decides_where_equal_keys_land(
    #[case] bias: Bias,
    #[case] expected_left: Vec<i32>,
    #[case] expected_right: Vec<i32>,
) {
    let sequence: OrderedSequence<i32> = [2, 3, 1, 2].into_iter().collect();
    let (left, right) = sequence.split(&2, bias);
    assert_eq!(left.iter().copied().collect::<Vec<_>>(), expected_left);
    assert_eq!(right.iter().copied().collect::<Vec<_>>(), expected_right);
}

#[rstest]
fn disjoint_merge_appends_ranges() {
    let low: OrderedSequence<i32> = (0..500).collect();
    let high: OrderedSequence<i32> = (500..1000).collect();
    assert!(low.merge(&high).iter().copied().eq(0..1000));
    assert!(high.merge(&low).iter().copied().eq(0..1000));
    assert!(low.intersect(&high).is_empty());
}

#[rstest]
fn priority_queue_schedules_by_deadline() {
    let queue = PriorityQueue::new()
        .push((30, "compact"))
        .push((10, "flush"))
        .push((20, "rotate"));
    let (first, rest) = queue.pop().unwrap();
    assert_eq!(first, &(10, "flush"));
    assert_eq!(rest.peek(), Some(&(20, "rotate")));
    assert_eq!(queue.len(), 3);
}

// =============================================================================
// Sized scenarios
// =============================================================================

#[rstest]
fn split_at_five_of_two_digit_numbers() {
    let sequence: RandomAccessSequence<i32> = (10..=99).collect();
    let (front, back) = sequence.split_at(5);
    assert_eq!(front.iter().copied().collect::<Vec<_>>(), vec![10, 11, 12, 13, 14]);
    assert_eq!(back.len(), 85);
    assert_eq!(back.head(), Ok(&15));
    assert_eq!(back.last(), Ok(&99));
}

#[rstest]
fn updates_leave_original_untouched() {
    let original: RandomAccessSequence<String> =
        ["a", "b", "c"].into_iter().map(String::from).collect();
    let updated = original
        .adjust(1, |value| value.to_uppercase())
        .and_then(|sequence| sequence.insert_at(0, "z".to_string()))
        .and_then(|sequence| sequence.remove_at(3))
        .unwrap();

    assert_eq!(updated.iter().map(String::as_str).collect::<Vec<_>>(), vec!["z", "a", "B"]);
    assert_eq!(original.iter().map(String::as_str).collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[rstest]
fn indexed_access_after_many_concatenations() {
    let sequence = (0..50).fold(RandomAccessSequence::new(), |sequence, block| {
        let chunk: RandomAccessSequence<i32> = (block * 20..block * 20 + 20).collect();
        sequence + chunk
    });
    assert_eq!(sequence.len(), 1000);
    for index in [0, 19, 20, 499, 999] {
        assert_eq!(sequence[index], i32::try_from(index).unwrap());
    }
}
