// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spanline: a balanced static interval tree.
//!
//! Spanline indexes a mutable collection of one-dimensional intervals — each
//! bound independently inclusive or exclusive, over any [`Ord`] value type —
//! and answers two questions efficiently:
//!
//! - which stored intervals contain this point ("stabbing" queries), and
//! - which stored intervals overlap this query interval.
//!
//! Mutation is decoupled from indexing: [`StaticIntervalTree::add`] and
//! [`StaticIntervalTree::remove`] are cheap edits to a backing collection,
//! and the first query after a mutation rebuilds the tree wholesale
//! (expected `O(n log n)`), then reuses it until the next mutation. Each
//! node's balancing key is the median of the subset's endpoint values,
//! picked by randomized quickselect, which keeps the tree balanced no matter
//! how interval lengths are distributed.
//!
//! Engines are swappable behind the [`IntervalContainer`] trait, so callers
//! written against the contract can trade this tree for another container
//! strategy without churn.
//!
//! # Example
//!
//! ```rust
//! use spanline::{Interval, StaticIntervalTree};
//!
//! let mut tree = StaticIntervalTree::from_intervals([
//!     Interval::closed(0, 15).unwrap(),
//!     Interval::closed(20, 25).unwrap(),
//!     Interval::closed(35, 45).unwrap(),
//! ]);
//!
//! // Intervals overlapping [10, 22].
//! let hits: Vec<_> = tree
//!     .query_interval(&Interval::closed(10, 22).unwrap())
//!     .collect();
//! assert_eq!(hits.len(), 2);
//!
//! // Intervals containing the point 21.
//! assert_eq!(tree.query_point(&21).count(), 1);
//!
//! // Exclusive bounds are exact: `(25, 35)` covers neither 25 nor 35.
//! tree.add(Interval::open(25, 35).unwrap());
//! assert_eq!(tree.query_point(&25).count(), 1); // still just [20, 25]
//! ```
//!
//! # Concurrency
//!
//! The tree is single-threaded and performs no internal locking. Query
//! iterators are lazy but borrow the tree, so the borrow checker rules out
//! mutating the collection while a result sequence is still being consumed;
//! materialize results first if you need to interleave.

#![no_std]

extern crate alloc;

pub mod container;
pub mod endpoint;
pub mod interval;
pub mod query;
mod select;
pub mod tree;

pub use container::IntervalContainer;
pub use endpoint::{Endpoint, EndpointKind};
pub use interval::{Interval, InvalidInterval};
pub use query::{Overlapping, Stabbing};
pub use tree::StaticIntervalTree;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn add_query_remove_round_trip() {
        let mut tree = StaticIntervalTree::new();
        tree.add(Interval::closed(0, 10).unwrap());
        tree.add(Interval::closed(5, 20).unwrap());

        let hits: Vec<_> = tree
            .query_point(&7)
            .cloned()
            .collect();
        assert_eq!(hits.len(), 2);

        tree.remove(&Interval::closed(5, 20).unwrap());
        assert_eq!(tree.query_point(&7).count(), 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn querying_the_span_returns_everything() {
        let mut tree = StaticIntervalTree::from_intervals([
            Interval::closed(-5, 3).unwrap(),
            Interval::open(10, 20).unwrap(),
            Interval::closed(7, 7).unwrap(),
        ]);
        let span = tree.span().unwrap().clone();
        assert_eq!(tree.query_interval(&span).count(), tree.len());
    }

    #[test]
    fn repeated_queries_agree() {
        let mut tree = StaticIntervalTree::from_intervals([
            Interval::closed(1, 4).unwrap(),
            Interval::closed(2, 6).unwrap(),
        ]);
        let query = Interval::closed(3, 3).unwrap();
        let first: Vec<_> = tree.query_interval(&query).cloned().collect();
        let second: Vec<_> = tree.query_interval(&query).cloned().collect();
        assert_eq!(first, second);
    }
}
