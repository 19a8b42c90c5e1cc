// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch origins expressed in POSIX seconds.
//!
//! | Epoch | Date (UTC) | POSIX seconds |
//! |-------|------------|---------------|
//! | [`Epoch::Lilian`] | 1582-10-15 | −12 219 292 800 |
//! | [`Epoch::Tai`] | 1958-01-01 | −378 691 200 |
//! | [`Epoch::Julian`] | 1968-05-01 | −52 704 000 |
//! | [`Epoch::Posix`] | 1970-01-01 | 0 |
//! | [`Epoch::Gps`] | 1980-01-06 | 315 964 800 |
//!
//! The positions are the civil (leap-second free) POSIX values of midnight on
//! each date, which is how every epoch-offset formula of this crate uses them.

use crate::julian::posix_seconds_at_midnight;

/// Reference origins of the time scales handled by this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Epoch {
    /// Gregorian calendar reform, origin of UUID / Tick60 timestamps.
    Lilian,
    /// International Atomic Time.
    Tai,
    /// First day of the month holding the Truncated Julian Date origin.
    Julian,
    /// Unix time.
    Posix,
    /// GPS time.
    Gps,
}

impl Epoch {
    /// Calendar date `(year, month, day)` of this epoch.
    pub const fn date(self) -> (i32, u8, u8) {
        match self {
            Self::Lilian => (1582, 10, 15),
            Self::Tai => (1958, 1, 1),
            Self::Julian => (1968, 5, 1),
            Self::Posix => (1970, 1, 1),
            Self::Gps => (1980, 1, 6),
        }
    }

    /// Seconds from the POSIX epoch to this epoch.
    pub const fn posix_seconds(self) -> i64 {
        let (year, month, day) = self.date();
        posix_seconds_at_midnight(year, month, day)
    }
}

/// Seconds from the Lilian epoch to the POSIX epoch.
pub const LILIAN_TO_POSIX: i64 = 12_219_292_800;

/// Seconds from the Lilian epoch to the GPS epoch.
pub const GPS_TO_LILIAN: i64 = Epoch::Gps.posix_seconds() - Epoch::Lilian.posix_seconds();

/// Seconds from the TAI epoch to the GPS epoch.
pub const TAI_TO_GPS: i64 = Epoch::Gps.posix_seconds() - Epoch::Tai.posix_seconds();

/// Fixed TAI − GPS offset. GPS time does not observe leap seconds.
pub const TAI_MINUS_GPS: i64 = 19;

/// TAI − UTC in effect on 1972-01-01, before the first recorded leap second.
pub const BASE_TAI_MINUS_UTC: i32 = 10;

/// 100 ns ticks per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Nanoseconds per 100 ns tick.
pub const NANOS_PER_TICK: u32 = 100;

/// Nanoseconds per second.
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Ticks from the Lilian epoch to the POSIX epoch (`0x01B2_1DD2_1381_4000`).
pub const LILIAN_TO_POSIX_TICKS: i64 = LILIAN_TO_POSIX * TICKS_PER_SECOND;
