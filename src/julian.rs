// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Truncated Julian Day (TJD) arithmetic.
//!
//! The day count used here is not the full Julian Period but NASA's
//! **Truncated Julian Date**: day 0 is 1968-05-24 and days begin at midnight,
//! not midday.  Both directions use the Fliegel–Van Flandern (1968) integer
//! algorithm on the proleptic Gregorian calendar; no floating point is
//! involved, so results are exact for every representable date.

/// Julian Day Number of TJD 0 plus one (1968-05-24 starts at JDN 2 440 001).
const TJD_JDN_OFFSET: i64 = 2_440_001;

/// Truncated Julian Day of the POSIX epoch (1970-01-01).
pub const POSIX_TJD: i64 = 587;

/// Seconds in a civil day without leap seconds.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Truncated Julian Day of a Gregorian calendar date.
///
/// This is a pure function, not a validator: out-of-range months or days are
/// not rejected and simply follow the arithmetic.
#[inline]
pub const fn truncated_julian_day(year: i32, month: u8, day: u8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;
    // Integer division truncates toward zero, so this is ceil((m - 14) / 12).
    let l = (m - 14) / 12;
    let jdn = (d - 32_075) + (1_461 * (y + 4_800 + l) / 4) + (367 * (m - 2 - l * 12) / 12)
        - (3 * ((y + 4_900 + l) / 100) / 4);
    jdn - TJD_JDN_OFFSET
}

/// Gregorian `(year, month, day)` of a Truncated Julian Day.
///
/// Inverse of [`truncated_julian_day`] for dates after 4713 BC.
pub const fn civil_from_truncated_julian_day(tjd: i64) -> (i32, u8, u8) {
    let mut l = tjd + TJD_JDN_OFFSET + 68_569;
    let n = 4 * l / 146_097;
    l -= (146_097 * n + 3) / 4;
    let i = 4_000 * (l + 1) / 1_461_001;
    l = l - 1_461 * i / 4 + 31;
    let j = 80 * l / 2_447;
    let day = l - 2_447 * j / 80;
    l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;
    (year as i32, month as u8, day as u8)
}

/// POSIX seconds at midnight UTC of the given calendar date.
#[inline]
pub const fn posix_seconds_at_midnight(year: i32, month: u8, day: u8) -> i64 {
    (truncated_julian_day(year, month, day) - POSIX_TJD) * SECONDS_PER_DAY
}
