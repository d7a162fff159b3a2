// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage: build a tree, mutate it, and run point and interval queries.

use spanline::{Interval, StaticIntervalTree};

fn main() {
    let mut tree = StaticIntervalTree::from_intervals([
        Interval::closed(0, 15).unwrap(),
        Interval::closed(20, 25).unwrap(),
        Interval::closed(35, 45).unwrap(),
    ]);

    let query = Interval::closed(10, 22).unwrap();
    println!("intervals overlapping {query}:");
    for hit in tree.query_interval(&query) {
        println!("  {hit}");
    }

    // Exclusive bounds are exact: (25, 35) covers neither 25 nor 35.
    tree.add(Interval::open(25, 35).unwrap());
    let at_25: Vec<_> = tree.query_point(&25).collect();
    println!("intervals containing 25: {}", at_25.len());

    let span = tree.span().expect("non-empty tree").clone();
    println!("span: {span}");
}
