// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Generic time–scale parameterised instant.
//!
//! [`Time<S>`] stores an exact `(seconds, nanos)` pair counted from the epoch
//! of the compile-time marker `S: TimeScale`.  Every atomic scale is a fixed
//! offset away from **TAI**, the canonical representation, so a cross-scale
//! conversion is a single integer addition and never loses precision.
//!
//! Domain-specific methods that only make sense for a particular scale
//! (e.g. GPS week numbering on [`Time<GPS>`](crate::GpsInstant)) live in
//! inherent `impl` blocks gated on the concrete marker type.

use std::marker::PhantomData;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

use crate::epoch::NANOS_PER_SECOND;
use crate::error::{TimeError, TimeResult};
use crate::leap::LeapSecondTable;
use crate::posix::Posix;
use crate::scales::TAI;
use crate::tick60::Tick60Instant;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for continuous (leap-second free) time scales.
///
/// A **time scale** defines:
///
/// 1. A human-readable **label** (e.g. `"TAI"`, `"GPS"`).
/// 2. The literal suffix of its `"<seconds>.<nanos><SUFFIX>"` text form.
/// 3. The constant number of seconds separating its epoch from the TAI epoch,
///    counted on the TAI axis.
pub trait TimeScale:
    Copy + Clone + std::fmt::Debug + PartialEq + Eq + PartialOrd + Ord + std::hash::Hash + 'static
{
    /// Display label used by `Debug`-style output and error messages.
    const LABEL: &'static str;

    /// Literal suffix of the text form.
    const TEXT_SUFFIX: &'static str;

    /// `tai_seconds = seconds_on_this_scale + TAI_OFFSET_SECONDS`.
    const TAI_OFFSET_SECONDS: i64;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>, the generic instant
// ═══════════════════════════════════════════════════════════════════════════

/// A point on time scale `S`: whole seconds since the scale's epoch plus a
/// nanosecond fraction in `0..1_000_000_000`.
///
/// Ordering is by seconds, then nanos.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time<S: TimeScale> {
    seconds: i64,
    nanos: u32,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    // ── constructors ──────────────────────────────────────────────────

    /// Create from seconds since the scale's epoch and a nanosecond fraction.
    ///
    /// # Panics
    ///
    /// If `nanos >= 1_000_000_000`.
    #[inline]
    pub const fn from_seconds(seconds: i64, nanos: u32) -> Self {
        assert!(nanos < NANOS_PER_SECOND, "nanos out of range");
        Self {
            seconds,
            nanos,
            _scale: PhantomData,
        }
    }

    /// Build the instant corresponding to a UTC [`Posix`] value.
    ///
    /// `tai = posix − posix(1958-01-01) + (TAI − UTC)`, with the offset taken
    /// from `table`.
    pub fn from_posix(posix: &Posix, table: &LeapSecondTable) -> Self {
        let seconds = table.tai_seconds_from_posix(posix.seconds());
        Time::<TAI>::from_seconds(seconds, posix.nanos()).to::<S>()
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Whole seconds since the scale's epoch.
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds within the current second.
    #[inline]
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    // ── cross-scale conversion ────────────────────────────────────────

    /// Convert this instant to another time scale.
    ///
    /// The conversion routes through the canonical TAI count:
    ///
    /// ```text
    /// self → TAI → target
    /// ```
    ///
    /// # Panics
    ///
    /// If the converted second count does not fit an `i64`, which only
    /// happens within a few hundred million seconds of `i64::MIN`/`i64::MAX`.
    /// Use [`checked_to`](Self::checked_to) for untrusted values.
    #[inline]
    pub const fn to<T: TimeScale>(&self) -> Time<T> {
        match self.checked_to::<T>() {
            Some(t) => t,
            None => panic!("instant out of range for the target time scale"),
        }
    }

    /// [`to`](Self::to), or `None` when the result overflows an `i64`.
    #[inline]
    pub const fn checked_to<T: TimeScale>(&self) -> Option<Time<T>> {
        // Both offsets are a few hundred million seconds, so this cannot overflow.
        let shift = S::TAI_OFFSET_SECONDS - T::TAI_OFFSET_SECONDS;
        match self.seconds.checked_add(shift) {
            Some(seconds) => Some(Time::<T>::from_seconds(seconds, self.nanos)),
            None => None,
        }
    }

    /// Convert to a 100 ns [`Tick60Instant`], truncating sub-tick nanoseconds.
    ///
    /// Fails with [`TimeError::OutOfRange`] outside the Tick60 range.
    #[inline]
    pub fn to_tick60(&self) -> TimeResult<Tick60Instant> {
        Tick60Instant::from_time(self)
    }

    /// Build from a [`Tick60Instant`].
    #[inline]
    pub fn from_tick60(tick: Tick60Instant) -> Self {
        tick.to_gps().to()
    }

    /// The UTC instant this value corresponds to.
    ///
    /// An inserted leap second has no POSIX count of its own and maps onto the
    /// first second after it.
    ///
    /// # Panics
    ///
    /// Outside the range of [`Posix::from_seconds`].
    pub fn to_posix(&self, table: &LeapSecondTable) -> Posix {
        let tai = self.to::<TAI>();
        Posix::from_seconds(table.posix_seconds_from_tai(tai.seconds), tai.nanos)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    fn total_nanos(&self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }

    fn from_total_nanos(total: i128) -> Option<Self> {
        let per_second = i128::from(NANOS_PER_SECOND);
        let seconds = i64::try_from(total.div_euclid(per_second)).ok()?;
        Some(Self::from_seconds(seconds, total.rem_euclid(per_second) as u32))
    }

    /// `self + delta`, or `None` on overflow.
    pub fn checked_add(&self, delta: TimeDelta) -> Option<Self> {
        let delta_nanos = i128::from(delta.num_seconds()) * i128::from(NANOS_PER_SECOND)
            + i128::from(delta.subsec_nanos());
        Self::from_total_nanos(self.total_nanos() + delta_nanos)
    }

    /// `self - delta`, or `None` on overflow.
    pub fn checked_sub(&self, delta: TimeDelta) -> Option<Self> {
        self.checked_add(-delta)
    }

    /// Signed elapsed time from `earlier` to `self`, or `None` if it does not
    /// fit a [`TimeDelta`].
    pub fn duration_since(&self, earlier: &Self) -> Option<TimeDelta> {
        let diff = self.total_nanos() - earlier.total_nanos();
        let per_second = i128::from(NANOS_PER_SECOND);
        let seconds = i64::try_from(diff.div_euclid(per_second)).ok()?;
        TimeDelta::new(seconds, diff.rem_euclid(per_second) as u32)
    }

    // ── binary form ───────────────────────────────────────────────────

    /// 12-byte big-endian encoding: `i64` seconds followed by `u32` nanos.
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[..8].copy_from_slice(&self.seconds.to_be_bytes());
        out[8..].copy_from_slice(&self.nanos.to_be_bytes());
        out
    }

    /// Decode the form produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> TimeResult<Self> {
        let bytes: &[u8; 12] = bytes
            .try_into()
            .map_err(|_| TimeError::invalid_format(S::LABEL, format!("{} bytes", bytes.len())))?;
        let mut seconds = [0u8; 8];
        let mut nanos = [0u8; 4];
        seconds.copy_from_slice(&bytes[..8]);
        nanos.copy_from_slice(&bytes[8..]);
        let nanos = u32::from_be_bytes(nanos);
        if nanos >= NANOS_PER_SECOND {
            return Err(TimeError::out_of_range("nanosecond", nanos));
        }
        Ok(Self::from_seconds(i64::from_be_bytes(seconds), nanos))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display / FromStr ─────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}{}", self.seconds, self.nanos, S::TEXT_SUFFIX)
    }
}

static SECONDS_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,12})\.(\d{3,15})([A-Z]+)$").expect("seconds text pattern is valid")
});

impl<S: TimeScale> FromStr for Time<S> {
    type Err = TimeError;

    /// Parse `"<seconds>.<nanos><SUFFIX>"` with 1–12 integer digits and
    /// 3–15 nanosecond digits.
    ///
    /// The part after the dot is an integer nanosecond count, not a decimal
    /// fraction: `"12.500TAI"` is 12 s and 500 ns.  A count of one second or
    /// more is [`TimeError::OutOfRange`].
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let caps = SECONDS_TEXT
            .captures(text)
            .filter(|c| &c[3] == S::TEXT_SUFFIX)
            .ok_or_else(|| TimeError::invalid_format(S::LABEL, text))?;
        let invalid = |_| TimeError::invalid_format(S::LABEL, text);
        let seconds = caps[1].parse::<i64>().map_err(invalid)?;
        // At most 15 digits, always fits a u64.
        let nanos = caps[2].parse::<u64>().map_err(invalid)?;
        let nanos = u32::try_from(nanos)
            .ok()
            .filter(|n| *n < NANOS_PER_SECOND)
            .ok_or_else(|| TimeError::out_of_range("nanosecond", nanos))?;
        Ok(Self::from_seconds(seconds, nanos))
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut state = serializer.serialize_struct(S::LABEL, 2)?;
        state.serialize_field("seconds", &self.seconds)?;
        state.serialize_field("nanos", &self.nanos)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            seconds: i64,
            nanos: u32,
        }

        let repr = Repr::deserialize(deserializer)?;
        if repr.nanos >= NANOS_PER_SECOND {
            return Err(serde::de::Error::custom(format!(
                "nanos out of range: {}",
                repr.nanos
            )));
        }
        Ok(Self::from_seconds(repr.seconds, repr.nanos))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<TimeDelta> for Time<S> {
    type Output = Self;

    /// # Panics
    ///
    /// On overflow of the seconds counter.
    #[inline]
    fn add(self, rhs: TimeDelta) -> Self::Output {
        self.checked_add(rhs)
            .expect("overflow when adding TimeDelta to instant")
    }
}

impl<S: TimeScale> Sub<TimeDelta> for Time<S> {
    type Output = Self;

    /// # Panics
    ///
    /// On overflow of the seconds counter.
    #[inline]
    fn sub(self, rhs: TimeDelta) -> Self::Output {
        self.checked_sub(rhs)
            .expect("overflow when subtracting TimeDelta from instant")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
