// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Median-of-endpoints selection for balancing keys.

use alloc::vec::Vec;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::interval::Interval;

/// The balancing key for a subset of intervals: the value at rank `n - 1`
/// (0-indexed) among the subset's `2n` endpoint values.
///
/// Taking the median of endpoints rather than of interval centers is what
/// bounds the build recursion at expected `O(log n)` regardless of how
/// interval lengths are distributed.
pub(crate) fn median_key<T: Ord + Clone>(
    intervals: &[Interval<T>],
    slots: &[usize],
    rng: &mut SmallRng,
) -> T {
    debug_assert!(!slots.is_empty(), "median of an empty subset");
    let mut endpoints = Vec::with_capacity(slots.len() * 2);
    for &slot in slots {
        let interval = &intervals[slot];
        endpoints.push(interval.min().value().clone());
        endpoints.push(interval.max().value().clone());
    }
    select(endpoints, slots.len() - 1, rng)
}

/// Randomized quickselect: the `k`-th smallest of `values`, 0-indexed.
///
/// Expected linear time, worst case quadratic. The random pivot makes
/// adversarial inputs astronomically unlikely, so the worst case is kept
/// rather than hardened away.
fn select<T: Ord>(mut values: Vec<T>, k: usize, rng: &mut SmallRng) -> T {
    let mut low = 0;
    let mut high = values.len() - 1;
    while high > low {
        let pivot = partition(&mut values, low, high, rng);
        if pivot > k {
            high = pivot - 1;
        } else if pivot < k {
            low = pivot + 1;
        } else {
            break;
        }
    }
    values.swap_remove(k)
}

/// Hoare partition around a randomly chosen pivot. On return the pivot sits
/// at the returned index, with nothing smaller above it and nothing larger
/// below it.
fn partition<T: Ord>(values: &mut [T], low: usize, high: usize, rng: &mut SmallRng) -> usize {
    values.swap(low, rng.gen_range(low..=high));
    let mut i = low;
    let mut j = high + 1;
    loop {
        loop {
            i += 1;
            if values[i] >= values[low] || i == high {
                break;
            }
        }
        loop {
            j -= 1;
            if values[low] >= values[j] || j == low {
                break;
            }
        }
        if i >= j {
            break;
        }
        values.swap(i, j);
    }
    values.swap(low, j);
    j
}
