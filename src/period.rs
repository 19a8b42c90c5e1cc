// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open intervals between instants.
//!
//! This module provides:
//! - [`Interval<T>`]: generic `[start, end)` range over any ordered instant
//! - [`Period<S>`]: scale-based alias for `Interval<Time<S>>`

use super::{Time, TimeScale};
use chrono::TimeDelta;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open range `[start, end)` of instants.
///
/// # Examples
///
/// ```
/// use leaptick::{Interval, TaiInstant};
///
/// let a = Interval::new(TaiInstant::from_seconds(0, 0), TaiInstant::from_seconds(10, 0));
/// let b = Interval::new(TaiInstant::from_seconds(5, 0), TaiInstant::from_seconds(20, 0));
/// let both = a.intersection(&b).unwrap();
/// assert_eq!(both.start.seconds(), 5);
/// assert!(!both.contains(&TaiInstant::from_seconds(10, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

/// Time-scale period alias: `Period<TAI>`, `Period<GPS>`.
pub type Period<S> = Interval<Time<S>>;

impl<T: Ord + Copy> Interval<T> {
    pub const fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `true` iff `start <= instant < end`.
    #[inline]
    pub fn contains(&self, instant: &T) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// `true` when no instant satisfies [`contains`](Self::contains).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the overlapping sub-interval of `self` and `other`.
    ///
    /// Touching intervals (`a.end == b.start`) do not overlap and yield `None`.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl<S: TimeScale> Interval<Time<S>> {
    /// Convert both endpoints to another time scale.
    pub fn to<T: TimeScale>(&self) -> Period<T> {
        Interval::new(self.start.to::<T>(), self.end.to::<T>())
    }

    /// Elapsed time from start to end, or `None` if it overflows [`TimeDelta`].
    pub fn duration(&self) -> Option<TimeDelta> {
        self.end.duration_since(&self.start)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
