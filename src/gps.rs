// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! GPS week numbering.
//!
//! Broadcast GPS time is expressed as a 10-bit week number (rolling over every
//! 1024 weeks, a *cycle*) plus seconds of the week.  This module adds that
//! decomposition to [`Time<GPS>`] and provides [`GpsWeek`], a whole week
//! expressed as a range of Tick60 values.

use crate::error::{TimeError, TimeResult};
use crate::period::Interval;
use crate::scales::GPS;
use crate::tick60::Tick60Instant;
use crate::Time;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds in one GPS week.
pub const SECONDS_PER_WEEK: i64 = 604_800;

/// Weeks in one GPS cycle (10-bit broadcast week number).
pub const WEEKS_PER_CYCLE: i64 = 1024;

// ── Time<GPS>-specific methods ────────────────────────────────────────────

impl Time<GPS> {
    /// Build from cycle, week within the cycle, seconds of the week and nanos.
    ///
    /// # Panics
    ///
    /// If `week >= 1024`, `seconds_of_week >= 604 800` or
    /// `nanos >= 1_000_000_000`.
    pub fn from_components(cycle: u32, week: u16, seconds_of_week: u32, nanos: u32) -> Self {
        assert!(i64::from(week) < WEEKS_PER_CYCLE, "GPS week out of range: {week}");
        assert!(
            i64::from(seconds_of_week) < SECONDS_PER_WEEK,
            "GPS seconds of week out of range: {seconds_of_week}"
        );
        let weeks = i64::from(cycle) * WEEKS_PER_CYCLE + i64::from(week);
        Self::from_seconds(weeks * SECONDS_PER_WEEK + i64::from(seconds_of_week), nanos)
    }

    /// Weeks since the GPS epoch, unbounded.
    #[inline]
    pub const fn absolute_week(&self) -> i64 {
        self.seconds().div_euclid(SECONDS_PER_WEEK)
    }

    /// Number of completed 1024-week rollovers.
    #[inline]
    pub const fn cycle(&self) -> i64 {
        self.absolute_week().div_euclid(WEEKS_PER_CYCLE)
    }

    /// Week within the current cycle, `0..1024`.
    #[inline]
    pub const fn week(&self) -> u16 {
        self.absolute_week().rem_euclid(WEEKS_PER_CYCLE) as u16
    }

    /// Seconds since the start of the week, `0..604 800`.
    #[inline]
    pub const fn seconds_of_week(&self) -> u32 {
        self.seconds().rem_euclid(SECONDS_PER_WEEK) as u32
    }
}

// ── GpsWeek ───────────────────────────────────────────────────────────────

/// One GPS week as the half-open Tick60 range `[begin, end)`.
///
/// Ordered by week number.  Serialized as the bare week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct GpsWeek {
    week: u32,
    span: Interval<Tick60Instant>,
}

impl GpsWeek {
    /// # Panics
    ///
    /// If the week's end lies beyond [`Tick60Instant::MAX`].
    pub fn new(week: u32) -> Self {
        match Self::try_new(week) {
            Ok(w) => w,
            Err(_) => panic!("GPS week {week} is outside the Tick60 range"),
        }
    }

    /// Fallible counterpart of [`GpsWeek::new`].
    pub fn try_new(week: u32) -> TimeResult<Self> {
        let start_of = |w: i64| Time::<GPS>::from_seconds(w * SECONDS_PER_WEEK, 0).to_tick60();
        let begin = start_of(i64::from(week))?;
        let end = start_of(i64::from(week) + 1)?;
        Ok(Self {
            week,
            span: Interval::new(begin, end),
        })
    }

    /// The week holding `tick`, or `None` before the GPS epoch.
    pub fn containing(tick: Tick60Instant) -> Option<Self> {
        let week = u32::try_from(tick.to_gps().absolute_week()).ok()?;
        Self::try_new(week).ok()
    }

    /// Weeks since the GPS epoch.
    #[inline]
    pub const fn number(&self) -> u32 {
        self.week
    }

    /// First tick of the week.
    #[inline]
    pub const fn begin(&self) -> Tick60Instant {
        self.span.start
    }

    /// First tick of the following week.
    #[inline]
    pub const fn end(&self) -> Tick60Instant {
        self.span.end
    }

    #[inline]
    pub const fn span(&self) -> Interval<Tick60Instant> {
        self.span
    }

    /// `true` iff `begin <= tick < end`.
    #[inline]
    pub fn contains(&self, tick: Tick60Instant) -> bool {
        self.span.contains(&tick)
    }

    /// The following week, or `None` past the Tick60 range.
    pub fn next(&self) -> Option<Self> {
        Self::try_new(self.week.checked_add(1)?).ok()
    }

    /// The preceding week, or `None` for week 0.
    pub fn previous(&self) -> Option<Self> {
        Self::try_new(self.week.checked_sub(1)?).ok()
    }
}

impl PartialOrd for GpsWeek {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GpsWeek {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.week.cmp(&other.week)
    }
}

impl std::fmt::Display for GpsWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GPS week {} [{}, {})", self.week, self.span.start, self.span.end)
    }
}

impl From<GpsWeek> for u32 {
    #[inline]
    fn from(week: GpsWeek) -> Self {
        week.week
    }
}

impl TryFrom<u32> for GpsWeek {
    type Error = TimeError;

    #[inline]
    fn try_from(week: u32) -> Result<Self, Self::Error> {
        Self::try_new(week)
    }
}
