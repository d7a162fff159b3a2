// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy traversal iterators for point and interval overlap queries.
//!
//! Both iterators walk the arena with an explicit worklist instead of
//! recursion, and both lean on the straddle-list sort orders for their early
//! exits. The early exits are correctness-critical, not just a shortcut:
//! each scan stops exactly where its sort order proves no later entry can
//! match, and nowhere earlier.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::interval::Interval;
use crate::tree::{ListRange, NodeIdx, StaticIntervalTree};

/// Which flat slot list a scan walks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum List {
    Asc,
    Desc,
}

/// An in-progress walk over one node's straddle list.
#[derive(Copy, Clone, Debug)]
struct Scan<M> {
    list: List,
    pos: usize,
    end: usize,
    mode: M,
}

impl<M> Scan<M> {
    const fn idle(mode: M) -> Self {
        Self {
            list: List::Asc,
            pos: 0,
            end: 0,
            mode,
        }
    }

    const fn over(list: List, range: ListRange, mode: M) -> Self {
        Self {
            list,
            pos: range.start,
            end: range.end(),
            mode,
        }
    }
}

/// How entries of the current scan are admitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OverlapMode {
    /// Every remaining entry is a proven match; yield without checking.
    Unchecked,
    /// Check each entry; the sort order says nothing about later entries.
    Filtered,
    /// Check each entry; the first miss ends the scan.
    SortedPrefix,
}

/// Pending traversal work for [`Overlapping`].
#[derive(Copy, Clone, Debug)]
enum Visit {
    /// Still descending toward the split node.
    Split(NodeIdx),
    /// Walking the split node's left subtree toward the query's lower bound.
    Left(NodeIdx),
    /// Walking the split node's right subtree toward the upper bound.
    Right(NodeIdx),
    /// Every interval at and below this node is a proven match.
    All(NodeIdx),
}

/// Lazy interval-overlap query over a [`StaticIntervalTree`].
///
/// Descends to the split node (the unique node whose key the query
/// straddles), scanning overlap prefixes along the way, then walks the two
/// independent boundary paths below it. Subtrees proven to sit strictly
/// inside the query are emitted without per-interval checks. Created by
/// [`StaticIntervalTree::query_interval`].
#[derive(Debug)]
pub struct Overlapping<'a, T> {
    tree: &'a StaticIntervalTree<T>,
    query: Interval<T>,
    scan: Scan<OverlapMode>,
    stack: Vec<Visit>,
}

impl<'a, T: Ord + Clone> Overlapping<'a, T> {
    pub(crate) fn new(tree: &'a StaticIntervalTree<T>, query: &Interval<T>) -> Self {
        let mut stack = Vec::new();
        // Quick reject: nothing can match a query outside the span.
        if let Some(root) = tree.root()
            && let Some(span) = tree.cached_span()
            && span.overlaps(query)
        {
            stack.push(Visit::Split(root));
        }
        Self {
            tree,
            query: query.clone(),
            scan: Scan::idle(OverlapMode::Unchecked),
            stack,
        }
    }

    fn visit(&mut self, visit: Visit) {
        match visit {
            Visit::Split(idx) => {
                let node = self.tree.node(idx);
                if *self.query.max().value() < node.key {
                    // Query sits below the key: only straddlers reaching
                    // far enough down can match, a prefix of `asc`.
                    self.scan = Scan::over(List::Asc, node.asc, OverlapMode::SortedPrefix);
                    if let Some(left) = node.left {
                        self.stack.push(Visit::Split(left));
                    }
                } else if node.key < *self.query.min().value() {
                    self.scan = Scan::over(List::Desc, node.desc, OverlapMode::SortedPrefix);
                    if let Some(right) = node.right {
                        self.stack.push(Visit::Split(right));
                    }
                } else {
                    // Split node: the query straddles the key. How far each
                    // straddler reaches past the key is not monotonic in
                    // either sort order, so the whole list is checked.
                    self.scan = Scan::over(List::Asc, node.asc, OverlapMode::Filtered);
                    if let Some(right) = node.right {
                        self.stack.push(Visit::Right(right));
                    }
                    if let Some(left) = node.left {
                        self.stack.push(Visit::Left(left));
                    }
                }
            }
            Visit::Left(idx) => {
                let node = self.tree.node(idx);
                match node.key.cmp(self.query.min().value()) {
                    Ordering::Less => {
                        // Only straddlers reaching right past the query's
                        // lower bound can match; `desc` exposes them as a
                        // prefix. Nodes further right sit closer to the
                        // bound.
                        self.scan = Scan::over(List::Desc, node.desc, OverlapMode::SortedPrefix);
                        if let Some(right) = node.right {
                            self.stack.push(Visit::Left(right));
                        }
                    }
                    Ordering::Greater => {
                        // The key is strictly inside the query, so every
                        // straddler here and everything in the right subtree
                        // is a proven match.
                        self.scan = Scan::over(List::Desc, node.desc, OverlapMode::Unchecked);
                        if let Some(right) = node.right {
                            self.stack.push(Visit::All(right));
                        }
                        if let Some(left) = node.left {
                            self.stack.push(Visit::Left(left));
                        }
                    }
                    Ordering::Equal => {
                        // The key sits exactly on the lower bound: list
                        // entries may touch it through an exclusive bound,
                        // the right subtree cannot.
                        self.scan = Scan::over(List::Desc, node.desc, OverlapMode::SortedPrefix);
                        if let Some(right) = node.right {
                            self.stack.push(Visit::All(right));
                        }
                    }
                }
            }
            Visit::Right(idx) => {
                let node = self.tree.node(idx);
                match node.key.cmp(self.query.max().value()) {
                    Ordering::Greater => {
                        self.scan = Scan::over(List::Asc, node.asc, OverlapMode::SortedPrefix);
                        if let Some(left) = node.left {
                            self.stack.push(Visit::Right(left));
                        }
                    }
                    Ordering::Less => {
                        self.scan = Scan::over(List::Asc, node.asc, OverlapMode::Unchecked);
                        if let Some(left) = node.left {
                            self.stack.push(Visit::All(left));
                        }
                        if let Some(right) = node.right {
                            self.stack.push(Visit::Right(right));
                        }
                    }
                    Ordering::Equal => {
                        self.scan = Scan::over(List::Asc, node.asc, OverlapMode::SortedPrefix);
                        if let Some(left) = node.left {
                            self.stack.push(Visit::All(left));
                        }
                    }
                }
            }
            Visit::All(idx) => {
                let node = self.tree.node(idx);
                self.scan = Scan::over(List::Asc, node.asc, OverlapMode::Unchecked);
                if let Some(left) = node.left {
                    self.stack.push(Visit::All(left));
                }
                if let Some(right) = node.right {
                    self.stack.push(Visit::All(right));
                }
            }
        }
    }

    fn slot(&self, pos: usize) -> usize {
        match self.scan.list {
            List::Asc => self.tree.asc_slot(pos),
            List::Desc => self.tree.desc_slot(pos),
        }
    }
}

impl<'a, T: Ord + Clone> Iterator for Overlapping<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while self.scan.pos < self.scan.end {
                let slot = self.slot(self.scan.pos);
                self.scan.pos += 1;
                let interval = self.tree.interval(slot);
                match self.scan.mode {
                    OverlapMode::Unchecked => return Some(interval),
                    OverlapMode::Filtered => {
                        if self.query.overlaps(interval) {
                            return Some(interval);
                        }
                    }
                    OverlapMode::SortedPrefix => {
                        if self.query.overlaps(interval) {
                            return Some(interval);
                        }
                        // Sorted list: every later entry misses too.
                        self.scan.pos = self.scan.end;
                    }
                }
            }
            let visit = self.stack.pop()?;
            self.visit(visit);
        }
    }
}

/// How entries of the current scan relate to the query point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StabMode {
    /// Point below the key: the prefix of `asc` whose min bounds cover the
    /// point; every entry in it reaches past the key and is a match.
    BelowKey,
    /// Point above the key: mirror prefix of `desc`.
    AboveKey,
    /// Point equals the key: min-bounded prefix of `asc`, but each entry's
    /// max bound still needs its own check — a straddler may end exactly at
    /// the point with an exclusive bound.
    AtKey,
}

/// Lazy point-overlap ("stabbing") query over a [`StaticIntervalTree`].
///
/// A single root-to-leaf descent: at each node the point picks a side, the
/// matching prefix of that node's straddle list is yielded, and the search
/// continues below; at a key equal to the point the search ends in that
/// node's list. Created by [`StaticIntervalTree::query_point`].
#[derive(Debug)]
pub struct Stabbing<'a, T> {
    tree: &'a StaticIntervalTree<T>,
    point: T,
    node: Option<NodeIdx>,
    scan: Scan<StabMode>,
}

impl<'a, T: Ord + Clone> Stabbing<'a, T> {
    pub(crate) fn new(tree: &'a StaticIntervalTree<T>, point: &T) -> Self {
        Self {
            tree,
            point: point.clone(),
            node: tree.root(),
            scan: Scan::idle(StabMode::AtKey),
        }
    }

    fn slot(&self, pos: usize) -> usize {
        match self.scan.list {
            List::Asc => self.tree.asc_slot(pos),
            List::Desc => self.tree.desc_slot(pos),
        }
    }
}

impl<'a, T: Ord + Clone> Iterator for Stabbing<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while self.scan.pos < self.scan.end {
                let slot = self.slot(self.scan.pos);
                self.scan.pos += 1;
                let interval = self.tree.interval(slot);
                match self.scan.mode {
                    StabMode::BelowKey => {
                        if interval.min().covers(&self.point) {
                            return Some(interval);
                        }
                        // Mins only grow from here; nothing later reaches
                        // back down to the point.
                        self.scan.pos = self.scan.end;
                    }
                    StabMode::AboveKey => {
                        if interval.max().covers(&self.point) {
                            return Some(interval);
                        }
                        self.scan.pos = self.scan.end;
                    }
                    StabMode::AtKey => {
                        if !interval.min().covers(&self.point) {
                            self.scan.pos = self.scan.end;
                        } else if interval.max().covers(&self.point) {
                            return Some(interval);
                        }
                        // Min side fine, max side exclusive at the point:
                        // skip this entry alone, the scan goes on.
                    }
                }
            }
            let idx = self.node.take()?;
            let node = self.tree.node(idx);
            match self.point.cmp(&node.key) {
                Ordering::Equal => {
                    // The search bottoms out here; everything containing the
                    // point straddles this key.
                    self.scan = Scan::over(List::Asc, node.asc, StabMode::AtKey);
                }
                Ordering::Less => {
                    self.scan = Scan::over(List::Asc, node.asc, StabMode::BelowKey);
                    self.node = node.left;
                }
                Ordering::Greater => {
                    self.scan = Scan::over(List::Desc, node.desc, StabMode::AboveKey);
                    self.node = node.right;
                }
            }
        }
    }
}
