// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scheduling-flavored walkthrough: work windows as minute offsets from a
//! shift start, queried for conflicts against a proposed booking.

use spanline::{Interval, StaticIntervalTree};

fn main() {
    // Existing bookings, in minutes from the start of the shift.
    let mut bookings = StaticIntervalTree::from_intervals([
        Interval::closed(0, 15).unwrap(),
        Interval::closed(20, 25).unwrap(),
        Interval::closed(35, 45).unwrap(),
        Interval::closed(3, 10).unwrap(),
        Interval::closed(11, 30).unwrap(),
        Interval::closed(5, 50).unwrap(),
    ]);

    // A proposed window that ends exactly where one booking starts: with an
    // open upper bound the two do not conflict.
    for proposal in [
        Interval::closed(7, 23).unwrap(),
        Interval::open(30, 40).unwrap(),
        Interval::new(30, 35, true, false).unwrap(),
    ] {
        let conflicts: Vec<_> = bookings.query_interval(&proposal).collect();
        println!("proposal {proposal}: {} conflict(s)", conflicts.len());
        for conflict in conflicts {
            println!("  overlaps {conflict}");
        }
    }

    // Cancelling a booking frees its window for the next lookup.
    bookings.remove(&Interval::closed(35, 45).unwrap());
    let proposal = Interval::open(30, 40).unwrap();
    println!(
        "after cancellation, proposal {proposal}: {} conflict(s)",
        bookings.query_interval(&proposal).count()
    );
}
