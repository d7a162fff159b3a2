// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The balanced static interval tree engine.
//!
//! Mutations only touch the backing collection and mark the cached tree
//! stale; the next query rebuilds the whole node graph from scratch. There
//! is no rotation or incremental rebalancing: recomputing the median split
//! on every rebuild guarantees balance by construction.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::container::IntervalContainer;
use crate::interval::Interval;
use crate::query::{Overlapping, Stabbing};
use crate::select::median_key;

/// Index of a node in the tree arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// A `(start, len)` window into one of the arena's flat slot vectors.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ListRange {
    pub(crate) start: usize,
    pub(crate) len: usize,
}

impl ListRange {
    pub(crate) const fn end(self) -> usize {
        self.start + self.len
    }
}

/// One tree node: the balancing key plus the intervals straddling it by
/// value (`min.value <= key <= max.value`).
///
/// The same straddle set is laid down twice: `asc` ordered by ascending min
/// endpoint, `desc` by descending max endpoint. Which order a traversal
/// scans decides which early exit it gets.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) asc: ListRange,
    pub(crate) desc: ListRange,
    pub(crate) left: Option<NodeIdx>,
    pub(crate) right: Option<NodeIdx>,
}

/// Node storage: one growable arena plus flat backing for the per-node
/// lists. Nodes are built once per rebuild and never mutated; discarding
/// the tree is three clears, with the allocations reused by the next build.
#[derive(Debug, Default)]
struct Arena<T> {
    nodes: Vec<Node<T>>,
    asc_slots: Vec<usize>,
    desc_slots: Vec<usize>,
}

impl<T> Arena<T> {
    fn clear(&mut self) {
        self.nodes.clear();
        self.asc_slots.clear();
        self.desc_slots.clear();
    }
}

/// Whether the cached tree still reflects the backing collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BuildState {
    /// The cached tree matches the backing collection.
    Fresh,
    /// A mutation happened since the last build; the next query rebuilds.
    Stale,
}

/// A balanced static interval tree over an ordered scalar.
///
/// Stores intervals with independently inclusive/exclusive bounds and
/// answers point and interval overlap queries in `O(log n + k)` per query
/// for `k` matches. [`add`](Self::add) and [`remove`](Self::remove) are
/// cheap edits to the backing collection; the tree itself is rebuilt
/// wholesale (expected `O(n log n)`) by the first query that follows a
/// mutation, then cached until the next one.
///
/// Each node's key is the median of the subset's endpoint values, chosen by
/// randomized quickselect, so the tree is balanced no matter how interval
/// lengths are distributed.
pub struct StaticIntervalTree<T> {
    intervals: Vec<Interval<T>>,
    arena: Arena<T>,
    root: Option<NodeIdx>,
    span: Option<Interval<T>>,
    state: BuildState,
    epoch: u64,
}

impl<T> StaticIntervalTree<T> {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            intervals: Vec::new(),
            arena: Arena {
                nodes: Vec::new(),
                asc_slots: Vec::new(),
                desc_slots: Vec::new(),
            },
            root: None,
            span: None,
            state: BuildState::Fresh,
            epoch: 0,
        }
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the tree holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// All stored intervals, in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }
}

impl<T: Ord + Clone> StaticIntervalTree<T> {
    /// Create a tree from an interval sequence and build it immediately.
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        let mut tree = Self::new();
        tree.intervals = intervals.into_iter().collect();
        tree.rebuild();
        tree
    }

    /// Add an interval. O(1); the cached tree is invalidated.
    pub fn add(&mut self, interval: Interval<T>) {
        self.intervals.push(interval);
        self.state = BuildState::Stale;
    }

    /// Remove the first stored interval equal to `interval`.
    ///
    /// A linear scan; removing an absent interval is a no-op. Either way
    /// the cached tree is invalidated.
    pub fn remove(&mut self, interval: &Interval<T>) {
        self.state = BuildState::Stale;
        if let Some(pos) = self.intervals.iter().position(|stored| stored == interval) {
            self.intervals.remove(pos);
        }
    }

    /// All stored intervals overlapping `query`, as a lazy iterator.
    ///
    /// Rebuilds the tree first if a mutation invalidated it; the returned
    /// iterator then borrows the tree, so further mutation has to wait until
    /// the iterator is dropped.
    pub fn query_interval(&mut self, query: &Interval<T>) -> Overlapping<'_, T> {
        self.sync();
        Overlapping::new(self, query)
    }

    /// All stored intervals containing `point`, as a lazy iterator.
    pub fn query_point(&mut self, point: &T) -> Stabbing<'_, T> {
        self.sync();
        Stabbing::new(self, point)
    }

    /// The tightest interval covering every stored interval, or `None` when
    /// the tree is empty.
    pub fn span(&mut self) -> Option<&Interval<T>> {
        self.sync();
        self.span.as_ref()
    }

    fn sync(&mut self) {
        if self.state == BuildState::Stale {
            self.rebuild();
        }
    }

    /// Rebuild the node graph from the backing collection.
    fn rebuild(&mut self) {
        self.arena.clear();
        self.root = None;
        self.span = None;
        self.state = BuildState::Fresh;
        if self.intervals.is_empty() {
            return;
        }

        // Fresh stream per build so consecutive rebuilds draw uncorrelated
        // pivots.
        self.epoch = self.epoch.wrapping_add(1);
        let mut rng = SmallRng::seed_from_u64(self.epoch.wrapping_mul(0x9E37_79B9_7F4A_7C15));

        // The span accumulator starts at the first interval and is widened
        // as straddle lists are laid down.
        let mut span = self.intervals[0].clone();
        let slots: Vec<usize> = (0..self.intervals.len()).collect();
        self.root = build_node(&self.intervals, &mut self.arena, &mut span, &mut rng, slots);
        self.span = Some(span);
    }
}

/// Build the subtree covering `slots`. Returns `None` for an empty subset.
fn build_node<T: Ord + Clone>(
    intervals: &[Interval<T>],
    arena: &mut Arena<T>,
    span: &mut Interval<T>,
    rng: &mut SmallRng,
    slots: Vec<usize>,
) -> Option<NodeIdx> {
    if slots.is_empty() {
        return None;
    }

    let key = median_key(intervals, &slots, rng);

    // Partition around the key by value alone. An interval touching the key
    // through an exclusive bound stays in the straddle lists; the traversals
    // re-check such boundaries per interval. Partitioning on inclusivity
    // instead would strand e.g. a lone `(3, 5]` on the `rights` side of its
    // own min endpoint forever.
    let mut lefts = Vec::new();
    let mut rights = Vec::new();
    let mut straddling = Vec::new();
    for slot in slots {
        let interval = &intervals[slot];
        if *interval.max().value() < key {
            lefts.push(slot);
        } else if key < *interval.min().value() {
            rights.push(slot);
        } else {
            straddling.push(slot);
        }
    }
    // The key is an endpoint value of at least one interval in the subset,
    // and that interval straddles it; the recursion always shrinks.
    debug_assert!(!straddling.is_empty(), "median key straddled by nothing");

    // Lay the straddle set down twice: ascending by min bound, descending by
    // max bound.
    let asc_start = arena.asc_slots.len();
    straddling.sort_by(|&a, &b| intervals[a].min().cmp(intervals[b].min()));
    arena.asc_slots.extend_from_slice(&straddling);
    let asc = ListRange {
        start: asc_start,
        len: straddling.len(),
    };

    let desc_start = arena.desc_slots.len();
    straddling.sort_by(|&a, &b| intervals[b].max().cmp(intervals[a].max()));
    arena.desc_slots.extend_from_slice(&straddling);
    let desc = ListRange {
        start: desc_start,
        len: straddling.len(),
    };

    // Widen the running span from the extremes at the front of each list.
    let lowest = intervals[arena.asc_slots[asc.start]].min();
    if lowest < span.min() {
        let max = span.max().clone();
        *span = Interval::from_endpoints(lowest.clone(), max);
    }
    let highest = intervals[arena.desc_slots[desc.start]].max();
    if highest > span.max() {
        let min = span.min().clone();
        *span = Interval::from_endpoints(min, highest.clone());
    }

    let idx = NodeIdx::new(arena.nodes.len());
    arena.nodes.push(Node {
        key,
        asc,
        desc,
        left: None,
        right: None,
    });

    let left = build_node(intervals, arena, span, rng, lefts);
    let right = build_node(intervals, arena, span, rng, rights);
    let node = &mut arena.nodes[idx.get()];
    node.left = left;
    node.right = right;

    Some(idx)
}

// Arena access for the traversal iterators.
impl<T> StaticIntervalTree<T> {
    pub(crate) fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    pub(crate) fn cached_span(&self) -> Option<&Interval<T>> {
        self.span.as_ref()
    }

    pub(crate) fn node(&self, idx: NodeIdx) -> &Node<T> {
        &self.arena.nodes[idx.get()]
    }

    pub(crate) fn interval(&self, slot: usize) -> &Interval<T> {
        &self.intervals[slot]
    }

    pub(crate) fn asc_slot(&self, pos: usize) -> usize {
        self.arena.asc_slots[pos]
    }

    pub(crate) fn desc_slot(&self, pos: usize) -> usize {
        self.arena.desc_slots[pos]
    }
}

impl<T> Default for StaticIntervalTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<Interval<T>> for StaticIntervalTree<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

impl<T> fmt::Debug for StaticIntervalTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticIntervalTree")
            .field("len", &self.intervals.len())
            .field("nodes", &self.arena.nodes.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T: Ord + Clone> IntervalContainer<T> for StaticIntervalTree<T> {
    fn add(&mut self, interval: Interval<T>) {
        Self::add(self, interval);
    }

    fn remove(&mut self, interval: &Interval<T>) {
        Self::remove(self, interval);
    }

    fn query_interval<'a>(
        &'a mut self,
        query: Option<&Interval<T>>,
    ) -> Box<dyn Iterator<Item = &'a Interval<T>> + 'a> {
        match query {
            Some(query) => Box::new(Self::query_interval(self, query)),
            None => Box::new(core::iter::empty()),
        }
    }

    fn query_point<'a>(
        &'a mut self,
        point: &T,
    ) -> Box<dyn Iterator<Item = &'a Interval<T>> + 'a> {
        Box::new(Self::query_point(self, point))
    }

    fn span(&mut self) -> Option<&Interval<T>> {
        Self::span(self)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn closed(min: i64, max: i64) -> Interval<i64> {
        Interval::closed(min, max).unwrap()
    }

    fn sample() -> StaticIntervalTree<i64> {
        StaticIntervalTree::from_intervals([
            closed(0, 15),
            closed(20, 25),
            closed(35, 45),
            closed(3, 10),
            closed(11, 30),
            closed(5, 50),
        ])
    }

    /// Walk the whole arena checking the structural invariants: straddle
    /// lists bracket the key by value and are correctly sorted, children sit
    /// strictly on their side of the key.
    fn assert_invariants(tree: &StaticIntervalTree<i64>) {
        fn walk(tree: &StaticIntervalTree<i64>, idx: NodeIdx) {
            let node = tree.node(idx);

            assert!(node.asc.len > 0, "node with an empty straddle list");
            assert_eq!(node.asc.len, node.desc.len);

            for pos in node.asc.start..node.asc.end() {
                let interval = tree.interval(tree.asc_slot(pos));
                assert!(*interval.min().value() <= node.key);
                assert!(node.key <= *interval.max().value());
                if pos > node.asc.start {
                    let prev = tree.interval(tree.asc_slot(pos - 1));
                    assert!(prev.min() <= interval.min());
                }
            }
            for pos in node.desc.start..node.desc.end() {
                let interval = tree.interval(tree.desc_slot(pos));
                assert!(*interval.min().value() <= node.key);
                assert!(node.key <= *interval.max().value());
                if pos > node.desc.start {
                    let prev = tree.interval(tree.desc_slot(pos - 1));
                    assert!(prev.max() >= interval.max());
                }
            }

            if let Some(left) = node.left {
                for pos in tree.node(left).asc.start..tree.node(left).asc.end() {
                    let interval = tree.interval(tree.asc_slot(pos));
                    assert!(*interval.max().value() < node.key);
                }
                walk(tree, left);
            }
            if let Some(right) = node.right {
                for pos in tree.node(right).asc.start..tree.node(right).asc.end() {
                    let interval = tree.interval(tree.asc_slot(pos));
                    assert!(node.key < *interval.min().value());
                }
                walk(tree, right);
            }
        }

        if let Some(root) = tree.root() {
            walk(tree, root);
        }
    }

    #[test]
    fn build_upholds_node_invariants() {
        let tree = sample();
        assert_invariants(&tree);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn every_interval_lands_in_exactly_one_node() {
        let tree = sample();
        let mut seen = vec![0_usize; tree.len()];
        for pos in 0..tree.arena.asc_slots.len() {
            seen[tree.asc_slot(pos)] += 1;
        }
        assert_eq!(seen, vec![1; tree.len()], "slot missing or duplicated");
    }

    #[test]
    fn span_covers_all_and_tightly() {
        let mut tree = sample();
        let span = tree.span().unwrap().clone();
        assert_eq!(span, closed(0, 50));

        tree.add(closed(-10, -5));
        assert_eq!(tree.span().unwrap().clone(), closed(-10, 50));
    }

    #[test]
    fn span_tie_break_prefers_inclusive_bounds() {
        let mut tree = StaticIntervalTree::from_intervals([
            Interval::new(0, 10, false, false).unwrap(),
            Interval::new(0, 10, true, true).unwrap(),
        ]);
        let span = tree.span().unwrap();
        assert!(span.min().is_inclusive());
        assert!(span.max().is_inclusive());
    }

    #[test]
    fn span_of_empty_is_none() {
        let mut tree = StaticIntervalTree::<i64>::new();
        assert_eq!(tree.span(), None);
        tree.add(closed(1, 2));
        tree.remove(&closed(1, 2));
        assert_eq!(tree.span(), None);
    }

    #[test]
    fn mutation_invalidates_and_query_rebuilds() {
        let mut tree = sample();
        // 21 sits inside [20, 25], [11, 30], and [5, 50].
        assert_eq!(tree.query_point(&21).count(), 3);

        tree.add(closed(21, 22));
        assert_eq!(tree.state, BuildState::Stale);
        assert_eq!(tree.query_point(&21).count(), 4);
        assert_eq!(tree.state, BuildState::Fresh);
        assert_invariants(&tree);

        tree.remove(&closed(21, 22));
        assert_eq!(tree.state, BuildState::Stale);
        assert_eq!(tree.query_point(&21).count(), 3);
        assert_invariants(&tree);
    }

    #[test]
    fn remove_takes_first_equal_and_ignores_absent() {
        let mut tree = StaticIntervalTree::from_intervals([closed(1, 2), closed(1, 2)]);
        tree.remove(&closed(1, 2));
        assert_eq!(tree.len(), 1);
        tree.remove(&closed(9, 10));
        assert_eq!(tree.len(), 1);
        tree.remove(&closed(1, 2));
        assert!(tree.is_empty());
    }

    #[test]
    fn rebuilds_are_balanced() {
        // 1024 uniform intervals: depth should stay near log2(n), nowhere
        // near the linear worst case of an unbalanced insertion order.
        let tree = StaticIntervalTree::from_intervals(
            (0..1024).map(|i| closed(i * 3, i * 3 + 40)),
        );

        fn depth(tree: &StaticIntervalTree<i64>, idx: NodeIdx) -> usize {
            let node = tree.node(idx);
            let left = node.left.map_or(0, |l| depth(tree, l));
            let right = node.right.map_or(0, |r| depth(tree, r));
            1 + left.max(right)
        }
        let d = depth(&tree, tree.root().unwrap());
        assert!(d <= 40, "depth {d} for 1024 intervals");
    }

    #[test]
    fn trait_object_contract() {
        let mut tree: Box<dyn IntervalContainer<i64>> = Box::<StaticIntervalTree<i64>>::default();
        tree.add(closed(0, 10));
        assert_eq!(tree.query_interval(None).count(), 0);
        assert_eq!(tree.query_interval(Some(&closed(5, 6))).count(), 1);
        assert_eq!(tree.query_point(&0).count(), 1);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }
}
