// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil (UTC) instants counted in POSIX seconds.
//!
//! A [`Posix`] value keeps the calendar fields it was built from next to the
//! derived POSIX second count.  Second `60` is admitted so that an inserted
//! leap second can be *named*; its POSIX count is the same as second `0` of
//! the following minute, exactly as POSIX time behaves.

use chrono::{DateTime, Utc};

use crate::error::{TimeError, TimeResult};
use crate::julian::{civil_from_truncated_julian_day, posix_seconds_at_midnight, SECONDS_PER_DAY};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// A UTC instant: calendar fields plus seconds since 1970-01-01T00:00:00Z.
///
/// Deserialization validates the calendar fields and recomputes `seconds`
/// from them; a serialized `seconds` value is ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Posix {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
    seconds: i64,
}

const fn fields_in_range(month: u8, day: u8, hour: u8, minute: u8, second: u8) -> bool {
    month >= 1 && month <= 12 && day >= 1 && day <= 31 && hour < 24 && minute < 60 && second <= 60
}

impl Posix {
    /// Build from calendar fields.
    ///
    /// # Panics
    ///
    /// If a field is outside its range (`1..=12`, `1..=31`, `0..24`, `0..60`,
    /// `0..=60`) or `nanos >= 1_000_000_000`.
    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Self {
        assert!(
            fields_in_range(month, day, hour, minute, second),
            "calendar field out of range: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        );
        assert!(nanos < 1_000_000_000, "nanos out of range: {nanos}");
        Self::build(year, month, day, hour, minute, second, nanos)
    }

    /// Midnight UTC of the given date.
    pub fn midnight(year: i32, month: u8, day: u8) -> Self {
        Self::from_calendar(year, month, day, 0, 0, 0, 0)
    }

    /// Fallible counterpart of [`Posix::from_calendar`].
    pub fn try_from_calendar(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> TimeResult<Self> {
        if !fields_in_range(month, day, hour, minute, second) {
            return Err(TimeError::InvalidCalendar {
                year,
                month,
                day,
                hour,
                minute,
                second,
            });
        }
        if nanos >= 1_000_000_000 {
            return Err(TimeError::out_of_range("nanosecond", nanos));
        }
        Ok(Self::build(year, month, day, hour, minute, second, nanos))
    }

    fn build(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8, nanos: u32) -> Self {
        let seconds = posix_seconds_at_midnight(year, month, day)
            + i64::from(hour) * 3_600
            + i64::from(minute) * 60
            + i64::from(second);
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            seconds,
        }
    }

    /// Earliest second count accepted by [`Posix::from_seconds`]: 4712 BC,
    /// start of the Julian Period on the proleptic Gregorian calendar.
    pub const MIN_SECONDS: i64 = posix_seconds_at_midnight(-4712, 1, 1);

    /// Latest second count accepted by [`Posix::from_seconds`]: the last
    /// second of year `i32::MAX`.
    pub const MAX_SECONDS: i64 = posix_seconds_at_midnight(i32::MAX, 12, 31) + SECONDS_PER_DAY - 1;

    /// Build from a POSIX second count. The derived second field is never 60.
    ///
    /// # Panics
    ///
    /// If `nanos >= 1_000_000_000`, or `seconds` lies outside
    /// [`MIN_SECONDS`](Self::MIN_SECONDS)`..=`[`MAX_SECONDS`](Self::MAX_SECONDS)
    /// where the year no longer fits an `i32`.
    pub fn from_seconds(seconds: i64, nanos: u32) -> Self {
        assert!(nanos < 1_000_000_000, "nanos out of range: {nanos}");
        assert!(
            (Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds),
            "POSIX seconds out of calendar range: {seconds}"
        );
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let in_day = seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_truncated_julian_day(days + crate::julian::POSIX_TJD);
        Self {
            year,
            month,
            day,
            hour: (in_day / 3_600) as u8,
            minute: (in_day % 3_600 / 60) as u8,
            second: (in_day % 60) as u8,
            nanos,
            seconds,
        }
    }

    /// The current wall-clock instant.
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Build from a `chrono::DateTime<Utc>`.
    ///
    /// chrono encodes a leap second as `nanos >= 1e9`; that is mapped onto
    /// second 60 of the same minute.
    pub fn from_datetime(datetime: &DateTime<Utc>) -> Self {
        let subsec = datetime.timestamp_subsec_nanos();
        if subsec >= 1_000_000_000 {
            let base = Self::from_seconds(datetime.timestamp(), 0);
            return Self::from_calendar(
                base.year,
                base.month,
                base.day,
                base.hour,
                base.minute,
                60,
                subsec - 1_000_000_000,
            );
        }
        Self::from_seconds(datetime.timestamp(), subsec)
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanos)
    }

    /// Seconds since the POSIX epoch.
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second of the minute, `60` for a named leap second.
    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }
}

impl std::fmt::Display for Posix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.nanos
        )
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Posix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            year: i32,
            month: u8,
            day: u8,
            hour: u8,
            minute: u8,
            second: u8,
            nanos: u32,
        }

        let r = Repr::deserialize(deserializer)?;
        Posix::try_from_calendar(r.year, r.month, r.day, r.hour, r.minute, r.second, r.nanos)
            .map_err(serde::de::Error::custom)
    }
}

impl From<DateTime<Utc>> for Posix {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(&datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn epoch_is_zero() {
        assert_eq!(Posix::midnight(1970, 1, 1).seconds(), 0);
    }

    #[test]
    fn calendar_fields_roundtrip_through_seconds() {
        let p = Posix::from_calendar(2012, 6, 30, 23, 59, 59, 250);
        let back = Posix::from_seconds(p.seconds(), p.nanos());
        assert_eq!(back, p);
        assert_eq!(back.to_string(), "2012-06-30T23:59:59.000000250Z");
    }

    #[test]
    fn leap_second_field_is_kept() {
        let leap = Posix::from_calendar(2016, 12, 31, 23, 59, 60, 0);
        assert_eq!(leap.second(), 60);
        // Same POSIX count as the first second of the next day.
        assert_eq!(leap.seconds(), Posix::midnight(2017, 1, 1).seconds());
        assert_eq!(leap.seconds(), 1_483_228_800);
    }

    #[test]
    fn negative_seconds_before_epoch() {
        let p = Posix::from_seconds(-1, 0);
        assert_eq!(
            (p.year(), p.month(), p.day(), p.hour(), p.minute(), p.second()),
            (1969, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    fn calendar_range_ends() {
        let first = Posix::from_seconds(Posix::MIN_SECONDS, 0);
        assert_eq!((first.year(), first.month(), first.day()), (-4712, 1, 1));
        let last = Posix::from_seconds(Posix::MAX_SECONDS, 0);
        assert_eq!(
            (last.year(), last.month(), last.day(), last.hour(), last.minute(), last.second()),
            (i32::MAX, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    #[should_panic(expected = "out of calendar range")]
    fn seconds_past_year_i32_max_panic() {
        let _ = Posix::from_seconds(Posix::MAX_SECONDS + 1, 0);
    }

    #[test]
    fn matches_chrono() {
        let dt = Utc.with_ymd_and_hms(2024, 2, 29, 12, 34, 56).unwrap();
        let p = Posix::from_datetime(&dt);
        assert_eq!(p.seconds(), dt.timestamp());
        assert_eq!(p.to_datetime(), Some(dt));
        assert_eq!(Posix::from_calendar(2024, 2, 29, 12, 34, 56, 0), p);
    }

    #[test]
    fn try_from_calendar_rejects_bad_fields() {
        assert!(matches!(
            Posix::try_from_calendar(2020, 13, 1, 0, 0, 0, 0),
            Err(TimeError::InvalidCalendar { month: 13, .. })
        ));
        assert!(Posix::try_from_calendar(2020, 1, 1, 24, 0, 0, 0).is_err());
        assert!(Posix::try_from_calendar(2020, 1, 1, 0, 0, 61, 0).is_err());
        assert!(Posix::try_from_calendar(2020, 1, 1, 0, 0, 60, 0).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_recomputes_seconds() {
        let p = Posix::from_calendar(2016, 12, 31, 23, 59, 60, 7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Posix>(&json).unwrap(), p);

        let forged = r#"{"year":2016,"month":12,"day":31,"hour":0,"minute":0,"second":0,"nanos":0,"seconds":5}"#;
        let back: Posix = serde_json::from_str(forged).unwrap();
        assert_eq!(back.seconds(), Posix::midnight(2016, 12, 31).seconds());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_out_of_range_fields() {
        let bad = r#"{"year":2016,"month":13,"day":40,"hour":99,"minute":0,"second":0,"nanos":0,"seconds":5}"#;
        assert!(serde_json::from_str::<Posix>(bad).is_err());
        let bad_nanos = r#"{"year":2016,"month":1,"day":1,"hour":0,"minute":0,"second":0,"nanos":1000000000}"#;
        assert!(serde_json::from_str::<Posix>(bad_nanos).is_err());
    }

    #[test]
    #[should_panic(expected = "calendar field out of range")]
    fn from_calendar_panics_on_bad_month() {
        let _ = Posix::from_calendar(2020, 0, 1, 0, 0, 0, 0);
    }
}
