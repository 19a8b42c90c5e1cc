// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! 60-bit count of 100 ns ticks since the Lilian epoch (1582-10-15).
//!
//! This is the timestamp layout of RFC 4122 version-1 UUIDs.  The count is
//! **atomic** when derived from GPS or TAI instants and **civil** when derived
//! from POSIX values; the two differ by the leap seconds accumulated so far.
//!
//! ```text
//! text   : 2015-07-01T00:00:00.123456700Z   (always 7 tick digits + "00")
//! binary : 8-byte big-endian u64, top 4 bits zero
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::epoch::{GPS_TO_LILIAN, LILIAN_TO_POSIX, NANOS_PER_TICK, TICKS_PER_SECOND};
use crate::error::{TimeError, TimeResult};
use crate::instant::TimeScale;
use crate::posix::Posix;
use crate::scales::GPS;
use crate::Time;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Count of 100 ns ticks since 1582-10-15T00:00:00, constrained to 60 bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct Tick60Instant(u64);

impl Tick60Instant {
    /// The Lilian epoch.
    pub const MIN: Self = Self(0);

    /// `2^60 − 1` ticks, some time in the year 5236.
    pub const MAX: Self = Self(0x0FFF_FFFF_FFFF_FFFF);

    /// # Panics
    ///
    /// If `ticks` exceeds [`Tick60Instant::MAX`].
    #[inline]
    pub const fn new(ticks: u64) -> Self {
        assert!(ticks <= Self::MAX.0, "Tick60 value exceeds 60 bits");
        Self(ticks)
    }

    /// Fallible counterpart of [`Tick60Instant::new`].
    pub fn try_new(ticks: u64) -> TimeResult<Self> {
        Self::checked(i128::from(ticks))
    }

    fn checked(ticks: i128) -> TimeResult<Self> {
        if (0..=i128::from(Self::MAX.0)).contains(&ticks) {
            Ok(Self(ticks as u64))
        } else {
            Err(TimeError::out_of_range("Tick60", ticks))
        }
    }

    /// `(seconds + epoch_to_lilian) · 10⁷ + nanos / 100`, range-checked.
    fn from_parts(seconds: i64, epoch_to_lilian: i64, nanos: u32) -> TimeResult<Self> {
        let since_lilian = i128::from(seconds) + i128::from(epoch_to_lilian);
        Self::checked(
            since_lilian * i128::from(TICKS_PER_SECOND) + i128::from(nanos / NANOS_PER_TICK),
        )
    }

    #[inline]
    pub const fn ticks(&self) -> u64 {
        self.0
    }

    /// Whole seconds since the Lilian epoch.
    #[inline]
    pub const fn seconds_since_lilian(&self) -> i64 {
        (self.0 / TICKS_PER_SECOND as u64) as i64
    }

    /// Nanoseconds within the current second, always a multiple of 100.
    #[inline]
    pub const fn subsec_nanos(&self) -> u32 {
        (self.0 % TICKS_PER_SECOND as u64) as u32 * NANOS_PER_TICK
    }

    // ── civil (leap-second free) mapping ──────────────────────────────

    /// Civil tick count of a UTC value: `(posix + 12 219 292 800) · 10⁷ + nanos / 100`.
    ///
    /// No leap-second table is involved.  A named leap second (`:60`) maps
    /// onto the first second of the following minute.
    pub fn from_posix(posix: &Posix) -> TimeResult<Self> {
        Self::from_parts(posix.seconds(), LILIAN_TO_POSIX, posix.nanos())
    }

    /// Inverse of [`from_posix`](Self::from_posix).
    pub fn to_posix(&self) -> Posix {
        Posix::from_seconds(self.seconds_since_lilian() - LILIAN_TO_POSIX, self.subsec_nanos())
    }

    /// Civil tick count of a chrono UTC instant.
    pub fn from_datetime(datetime: &DateTime<Utc>) -> TimeResult<Self> {
        Self::from_posix(&Posix::from_datetime(datetime))
    }

    /// `None` outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        self.to_posix().to_datetime()
    }

    // ── atomic mapping ────────────────────────────────────────────────

    /// Atomic tick count of a GPS instant, truncated to 100 ns.
    pub fn from_gps(gps: &Time<GPS>) -> TimeResult<Self> {
        Self::from_parts(gps.seconds(), GPS_TO_LILIAN, gps.nanos())
    }

    /// Inverse of [`from_gps`](Self::from_gps).
    pub fn to_gps(&self) -> Time<GPS> {
        Time::from_seconds(self.seconds_since_lilian() - GPS_TO_LILIAN, self.subsec_nanos())
    }

    /// Atomic tick count of an instant on any atomic scale.
    ///
    /// Fails with [`TimeError::OutOfRange`] outside the Tick60 range, including
    /// seconds too far out to express on the GPS scale at all.
    pub fn from_time<S: TimeScale>(time: &Time<S>) -> TimeResult<Self> {
        let gps = time
            .checked_to::<GPS>()
            .ok_or_else(|| TimeError::out_of_range("Tick60", time.seconds()))?;
        Self::from_gps(&gps)
    }

    #[inline]
    pub fn to_time<S: TimeScale>(&self) -> Time<S> {
        self.to_gps().to::<S>()
    }

    // ── binary form ───────────────────────────────────────────────────

    /// 8-byte big-endian encoding.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Decode the form produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> TimeResult<Self> {
        let bytes: [u8; 8] = bytes
            .try_into()
            .map_err(|_| TimeError::invalid_format("Tick60", format!("{} bytes", bytes.len())))?;
        Self::try_new(u64::from_be_bytes(bytes))
    }
}

// ── conversions ───────────────────────────────────────────────────────────

impl From<Tick60Instant> for u64 {
    #[inline]
    fn from(tick: Tick60Instant) -> Self {
        tick.0
    }
}

impl TryFrom<u64> for Tick60Instant {
    type Error = TimeError;

    #[inline]
    fn try_from(ticks: u64) -> Result<Self, Self::Error> {
        Self::try_new(ticks)
    }
}

impl<S: TimeScale> TryFrom<Time<S>> for Tick60Instant {
    type Error = TimeError;

    #[inline]
    fn try_from(time: Time<S>) -> Result<Self, Self::Error> {
        Self::from_time(&time)
    }
}

impl<S: TimeScale> From<Tick60Instant> for Time<S> {
    #[inline]
    fn from(tick: Tick60Instant) -> Self {
        tick.to_time()
    }
}

// ── text form ─────────────────────────────────────────────────────────────

impl std::fmt::Display for Tick60Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let civil = Posix::from_seconds(self.seconds_since_lilian() - LILIAN_TO_POSIX, 0);
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:07}00Z",
            civil.year(),
            civil.month(),
            civil.day(),
            civil.hour(),
            civil.minute(),
            civil.second(),
            self.0 % TICKS_PER_SECOND as u64
        )
    }
}

/// Decimal fraction digits → nanoseconds, right-padded to 9 digits.
fn fraction_to_nanos(digits: &str) -> u32 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
}

static TICK60_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})[T ](\d{2}):(\d{2}):(\d{2})\.(\d{3,9})Z$")
        .expect("Tick60 text pattern is valid")
});

impl FromStr for Tick60Instant {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD(T| )HH:MM:SS.fffZ` with 3 to 9 fractional digits.
    ///
    /// Second `60` is accepted and lands on the next minute's first second.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let caps = TICK60_TEXT
            .captures(text)
            .ok_or_else(|| TimeError::invalid_format("Tick60", text))?;
        // Every group is all-digits and at most 4 wide, so these cannot fail.
        let field = |i: usize| caps[i].parse::<u16>().unwrap_or_default();
        let posix = Posix::try_from_calendar(
            i32::from(field(1)),
            field(2) as u8,
            field(3) as u8,
            field(4) as u8,
            field(5) as u8,
            field(6) as u8,
            fraction_to_nanos(&caps[7]),
        )?;
        Self::from_posix(&posix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::TAI;

    #[test]
    fn posix_epoch_is_lilian_offset() {
        let t = Tick60Instant::from_posix(&Posix::midnight(1970, 1, 1)).unwrap();
        assert_eq!(t.ticks(), 0x01B2_1DD2_1381_4000);
        assert_eq!(t.ticks(), 122_192_928_000_000_000);
    }

    #[test]
    fn gps_epoch_ticks() {
        let t = Tick60Instant::from_gps(&Time::from_seconds(0, 0)).unwrap();
        assert_eq!(t.ticks() as i64, GPS_TO_LILIAN * TICKS_PER_SECOND);
        assert_eq!(t.to_gps(), Time::from_seconds(0, 0));
    }

    #[test]
    fn gps_conversion_truncates_to_100ns() {
        let gps = Time::<GPS>::from_seconds(1_000, 123_456_789);
        let t = Tick60Instant::from_gps(&gps).unwrap();
        assert_eq!(t.to_gps(), Time::from_seconds(1_000, 123_456_700));
    }

    #[test]
    fn leap_second_text_lands_on_next_day() {
        let t: Tick60Instant = "2015-06-30T23:59:60.1234567Z".parse().unwrap();
        assert_eq!(t.ticks(), 136_550_016_001_234_567);
        assert_eq!(t.to_string(), "2015-07-01T00:00:00.123456700Z");
    }

    #[test]
    fn text_accepts_space_separator_and_short_fraction() {
        let a: Tick60Instant = "2000-01-01 12:00:00.500Z".parse().unwrap();
        let b: Tick60Instant = "2000-01-01T12:00:00.500000000Z".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn text_rejects_bad_input() {
        for bad in [
            "2000-01-01T12:00:00Z",
            "2000-01-01T12:00:00.50Z",
            "2000-01-01T12:00:00.5000000000Z",
            "2000-01-01T12:00:00.500",
            "2000-13-01T12:00:00.500Z",
            "2000-01-01T24:00:00.500Z",
            "1500-01-01T00:00:00.000Z",
            "5300-01-01T00:00:00.000Z",
        ] {
            let err = bad.parse::<Tick60Instant>().unwrap_err();
            assert!(err.is_format_error(), "{bad}: {err}");
        }
    }

    #[test]
    fn range_is_60_bits() {
        assert!(Tick60Instant::try_new(Tick60Instant::MAX.ticks()).is_ok());
        assert!(matches!(
            Tick60Instant::try_new(Tick60Instant::MAX.ticks() + 1),
            Err(TimeError::OutOfRange { .. })
        ));
        let before_lilian = Posix::midnight(1582, 10, 14);
        assert!(Tick60Instant::from_posix(&before_lilian).is_err());
    }

    #[test]
    fn extreme_seconds_are_out_of_range_not_overflow() {
        let gps = Time::<GPS>::from_seconds(i64::MAX, 0);
        assert!(matches!(
            Tick60Instant::from_gps(&gps),
            Err(TimeError::OutOfRange { .. })
        ));
        assert!(gps.to_tick60().is_err());

        let mut bytes = [0u8; 12];
        bytes[..8].copy_from_slice(&i64::MIN.to_be_bytes());
        let tai = Time::<TAI>::from_bytes(&bytes).unwrap();
        assert!(matches!(
            Tick60Instant::try_from(tai),
            Err(TimeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn fraction_digits_are_right_padded() {
        assert_eq!(fraction_to_nanos("123"), 123_000_000);
        assert_eq!(fraction_to_nanos("1234567"), 123_456_700);
        assert_eq!(fraction_to_nanos("000000001"), 1);
    }

    #[test]
    #[should_panic(expected = "exceeds 60 bits")]
    fn new_panics_above_max() {
        let _ = Tick60Instant::new(u64::MAX);
    }

    #[test]
    fn bytes_are_big_endian() {
        let t = Tick60Instant::new(0x0102_0304_0506_0708);
        assert_eq!(t.to_bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(Tick60Instant::from_bytes(&t.to_bytes()).unwrap(), t);
        assert!(Tick60Instant::from_bytes(&[0xFF; 8]).is_err());
        assert!(Tick60Instant::from_bytes(&[0; 7]).is_err());
    }

    #[test]
    fn tai_roundtrip_is_exact_at_tick_resolution() {
        let tai = Time::<TAI>::from_seconds(1_861_920_037, 999_999_900);
        let t = Tick60Instant::try_from(tai).unwrap();
        assert_eq!(Time::<TAI>::from(t), tai);
    }

    #[test]
    fn chrono_interop() {
        let dt = DateTime::<Utc>::from_timestamp(1_700_000_000, 250_000_000).unwrap();
        let t = Tick60Instant::from_datetime(&dt).unwrap();
        assert_eq!(t.to_datetime(), Some(dt));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_is_a_bare_integer() {
        let t = Tick60Instant::new(42);
        assert_eq!(serde_json::to_string(&t).unwrap(), "42");
        assert_eq!(serde_json::from_str::<Tick60Instant>("42").unwrap(), t);
        assert!(serde_json::from_str::<Tick60Instant>("18446744073709551615").is_err());
    }
}
