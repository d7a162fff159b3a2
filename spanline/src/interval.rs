// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intervals with independently inclusive/exclusive bounds.

use core::cmp::Ordering;
use core::error::Error;
use core::fmt;

use crate::endpoint::{Endpoint, EndpointKind};

/// Error returned when an interval's lower bound exceeds its upper bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidInterval;

impl fmt::Display for InvalidInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("interval minimum exceeds its maximum")
    }
}

impl Error for InvalidInterval {}

/// A one-dimensional interval over an ordered scalar.
///
/// Both bounds carry their own inclusivity, so `[2, 5)` and `(2, 5]` are
/// distinct values. Equal bounds are allowed: `[3, 3]` is a degenerate point
/// interval, while `(3, 3)` admits nothing. An interval is immutable once
/// constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    min: Endpoint<T>,
    max: Endpoint<T>,
}

impl<T: Ord> Interval<T> {
    /// Create an interval with explicit inclusivity on both bounds.
    ///
    /// Fails when `min` exceeds `max` by value; equal values are fine.
    pub fn new(
        min: T,
        max: T,
        min_inclusive: bool,
        max_inclusive: bool,
    ) -> Result<Self, InvalidInterval> {
        if min > max {
            return Err(InvalidInterval);
        }
        Ok(Self {
            min: Endpoint::new(min, min_inclusive, EndpointKind::Min),
            max: Endpoint::new(max, max_inclusive, EndpointKind::Max),
        })
    }

    /// `[min, max]`: both bounds included.
    pub fn closed(min: T, max: T) -> Result<Self, InvalidInterval> {
        Self::new(min, max, true, true)
    }

    /// `(min, max)`: both bounds excluded.
    pub fn open(min: T, max: T) -> Result<Self, InvalidInterval> {
        Self::new(min, max, false, false)
    }

    /// Whether this interval contains the point.
    pub fn contains_point(&self, point: &T) -> bool {
        self.min.covers(point) && self.max.covers(point)
    }

    /// Whether two intervals share at least one point.
    ///
    /// Touching bounds only count when both are inclusive: `[0, 2]` overlaps
    /// `[2, 4]` but not `(2, 4]`, and `[0, 2)` overlaps neither.
    pub fn overlaps(&self, other: &Self) -> bool {
        !ends_before(&self.max, &other.min) && !ends_before(&other.max, &self.min)
    }

    /// Stitch an interval together from two already-validated bounds.
    pub(crate) fn from_endpoints(min: Endpoint<T>, max: Endpoint<T>) -> Self {
        debug_assert!(min.value() <= max.value(), "inverted interval bounds");
        Self { min, max }
    }
}

impl<T: Ord + Clone> Interval<T> {
    /// The degenerate interval `[value, value]`.
    pub fn point(value: T) -> Self {
        Self {
            min: Endpoint::new(value.clone(), true, EndpointKind::Min),
            max: Endpoint::new(value, true, EndpointKind::Max),
        }
    }
}

impl<T> Interval<T> {
    /// The lower bound.
    pub const fn min(&self) -> &Endpoint<T> {
        &self.min
    }

    /// The upper bound.
    pub const fn max(&self) -> &Endpoint<T> {
        &self.max
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min.is_inclusive() { '[' } else { '(' };
        let close = if self.max.is_inclusive() { ']' } else { ')' };
        write!(
            f,
            "{open}{}, {}{close}",
            self.min.value(),
            self.max.value()
        )
    }
}

/// Whether `max` ends strictly before `min` begins, honoring inclusivity
/// when the two values tie.
fn ends_before<T: Ord>(max: &Endpoint<T>, min: &Endpoint<T>) -> bool {
    match max.value().cmp(min.value()) {
        Ordering::Less => true,
        Ordering::Equal => !(max.is_inclusive() && min.is_inclusive()),
        Ordering::Greater => false,
    }
}
