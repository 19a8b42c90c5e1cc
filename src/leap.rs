// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap-second ledger
//!
//! A [`LeapSecondTable`] is built once from the text of a tz-style
//! `leapseconds` file and is immutable afterwards, so it can be shared by any
//! number of threads behind an [`Arc`](std::sync::Arc) without locking.
//!
//! ## Ledger format
//!
//! ```text
//! # comments and blank lines are ignored
//! Leap	1972	Jun	30	23:59:60	+	S
//! Leap	1972	Dec	31	23:59:60	+	S
//! ```
//!
//! Each `Leap` record shifts TAI − UTC by one second: `+` inserts a second
//! (forward jump of the offset), `-` removes one.  The running offset starts at
//! 10 s, the value adopted when UTC was redefined on 1972-01-01.  The trailing
//! `R`/`S` (rolling/stationary) token is accepted and ignored.
//!
//! ## Example
//! ```rust
//! use leaptick::{LeapSecondTable, LeapTableConfig};
//!
//! let ledger = "Leap 1972 Jun 30 23:59:60 + S\nLeap 1972 Dec 31 23:59:60 + S\n";
//! let config = LeapTableConfig::default().with_minimum_entries(2);
//! let table = LeapSecondTable::parse(ledger, &config).unwrap();
//! assert_eq!(table.final_offset(), 12);
//! ```

use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::LeapTableConfig;
use crate::epoch::{Epoch, BASE_TAI_MINUS_UTC};
use crate::error::{TimeError, TimeResult};
use crate::posix::Posix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shared handle to a loaded table.
pub type SharedLeapTable = Arc<LeapSecondTable>;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Leap\s+(\d{4})\s+(\w+)\s+(\d{2})\s+(\d{2}):(\d{2}):(\d{2})\s+([+-])(?:\s+([RS]))?\s*(?:#.*)?$",
    )
    .expect("leap record pattern is valid")
});

// ═══════════════════════════════════════════════════════════════════════════
// LeapSecond record
// ═══════════════════════════════════════════════════════════════════════════

/// Direction of a leap-second correction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// A second is removed from UTC; TAI − UTC decreases by one.
    Backward,
    /// A second is inserted into UTC; TAI − UTC increases by one.
    Forward,
}

impl Direction {
    /// `+1` for [`Forward`](Self::Forward), `-1` for [`Backward`](Self::Backward).
    #[inline]
    pub const fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// One correction of the ledger.
///
/// Ordering follows [`occurs_at_posix_seconds`](Self::occurs_at_posix_seconds).
/// Records only come out of [`LeapSecondTable::parse`], so they serialize but
/// do not deserialize.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LeapSecond {
    // Kept first: the derived `Ord` sorts by occurrence.
    occurs_at_posix_seconds: i64,
    offset: i32,
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    direction: Direction,
}

impl LeapSecond {
    #[allow(clippy::too_many_arguments)]
    fn new(
        offset: i32,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        direction: Direction,
    ) -> Self {
        // The named second may be 60, which a calendar type would roll over,
        // so the occurrence is the start of the minute plus the raw second.
        let minute_start = Posix::from_calendar(year, month, day, hour, minute, 0, 0).seconds();
        Self {
            occurs_at_posix_seconds: minute_start + i64::from(second),
            offset,
            year,
            month,
            day,
            hour,
            minute,
            second,
            direction,
        }
    }

    /// A record past any instant in range, carrying `offset`.
    fn infinity(offset: i32) -> Self {
        Self::new(offset, 9999, 12, 31, 23, 59, 59, Direction::Forward)
    }

    /// POSIX second at which the correction has taken effect.
    #[inline]
    pub const fn occurs_at_posix_seconds(&self) -> i64 {
        self.occurs_at_posix_seconds
    }

    /// TAI − UTC in seconds from this record onwards.
    #[inline]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    #[inline]
    pub const fn direction(&self) -> Direction {
        self.direction
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

    /// The named second, `60` for an inserted leap second.
    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl std::fmt::Display for LeapSecond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.direction {
            Direction::Forward => '+',
            Direction::Backward => '-',
        };
        write!(
            f,
            "Leap {:04} {} {:02} {:02}:{:02}:{:02} {} S",
            self.year,
            MONTHS[usize::from(self.month) - 1],
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════════

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_from_abbrev(name: &str) -> TimeResult<u8> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u8 + 1)
        .ok_or_else(|| TimeError::UnknownMonth(name.to_owned()))
}

/// Fields of a single `Leap` line, before the running offset is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct RecordFields {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    direction: Direction,
}

impl RecordFields {
    fn into_record(self, offset: i32) -> LeapSecond {
        LeapSecond::new(
            offset,
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.direction,
        )
    }
}

fn parse_record(line_no: usize, line: &str) -> TimeResult<RecordFields> {
    let malformed = |reason: &'static str| TimeError::MalformedRecord {
        line: line_no,
        text: line.to_owned(),
        reason,
    };

    let caps = RECORD
        .captures(line)
        .ok_or_else(|| malformed("does not match `Leap YYYY Mon DD HH:MM:SS +|- R|S`"))?;
    // The pattern only admits ASCII digits of bounded width, so these parses
    // cannot fail.
    let number = |i: usize| caps[i].parse::<u16>().unwrap_or_default();

    let year = i32::from(number(1));
    let month = month_from_abbrev(&caps[2])?;
    let (day, hour, minute, second) = (number(3), number(4), number(5), number(6));
    let direction = if &caps[7] == "+" {
        Direction::Forward
    } else {
        Direction::Backward
    };

    if year < 1972 {
        return Err(malformed("leap seconds start in 1972"));
    }
    if !(1..=31).contains(&day) {
        return Err(malformed("day out of range"));
    }
    if hour >= 24 || minute >= 60 || second > 60 {
        return Err(malformed("time of day out of range"));
    }

    Ok(RecordFields {
        year,
        month,
        day: day as u8,
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        direction,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// LeapSecondTable
// ═══════════════════════════════════════════════════════════════════════════

/// Validated, chronologically ordered leap-second ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSecondTable {
    records: Vec<LeapSecond>,
    infinity: LeapSecond,
}

impl LeapSecondTable {
    /// Parse ledger text.
    ///
    /// Fails on the first malformed `Leap` line and when fewer than
    /// `config.minimum_entries` records are found; no table is produced in
    /// either case.
    pub fn parse(text: &str, config: &LeapTableConfig) -> TimeResult<Self> {
        let mut records = Vec::new();
        let mut offset = BASE_TAI_MINUS_UTC;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if !line.starts_with("Leap") {
                continue;
            }
            let fields = parse_record(index + 1, line)?;
            offset += fields.direction.step();
            let record = fields.into_record(offset);
            debug!(line = index + 1, %record, offset, "parsed leap-second record");
            records.push(record);
        }

        if records.len() < config.minimum_entries {
            warn!(
                found = records.len(),
                required = config.minimum_entries,
                "rejecting leap-second ledger with too few entries"
            );
            return Err(TimeError::InsufficientEntries {
                found: records.len(),
                required: config.minimum_entries,
            });
        }

        if records.windows(2).any(|w| w[0] > w[1]) {
            warn!("leap-second ledger is out of chronological order; sorting it");
            records.sort();
        }

        let table = Self {
            infinity: LeapSecond::infinity(offset),
            records,
        };
        info!(
            entries = table.len(),
            final_offset = table.final_offset(),
            last_leap = table.last().map(LeapSecond::occurs_at_posix_seconds),
            "loaded leap-second table"
        );
        Ok(table)
    }

    /// Read and parse a ledger file.
    pub fn from_file(path: impl AsRef<Path>, config: &LeapTableConfig) -> TimeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, config)
    }

    /// Wrap the table for sharing across threads.
    pub fn into_shared(self) -> SharedLeapTable {
        Arc::new(self)
    }

    // ── queries ───────────────────────────────────────────────────────

    /// TAI − UTC in effect at the given POSIX second.
    ///
    /// From the occurrence of a record onwards its offset applies; before the
    /// first record the 1972 base offset of 10 s is returned.
    pub fn offset(&self, posix_seconds: i64) -> i32 {
        // Index of the first record strictly after `posix_seconds`.
        let after = self
            .records
            .partition_point(|r| r.occurs_at_posix_seconds <= posix_seconds);
        match after {
            0 => BASE_TAI_MINUS_UTC,
            i => self.records[i - 1].offset,
        }
    }

    /// [`offset`](Self::offset) for a [`Posix`] instant.
    #[inline]
    pub fn offset_at(&self, posix: &Posix) -> i32 {
        self.offset(posix.seconds())
    }

    /// `true` iff a correction occurs exactly at `posix_seconds`.
    pub fn is_leap_second(&self, posix_seconds: i64) -> bool {
        self.records
            .binary_search_by_key(&posix_seconds, LeapSecond::occurs_at_posix_seconds)
            .is_ok()
    }

    /// Seconds from `posix_seconds` until the last known correction.
    ///
    /// Negative once the instant lies past the end of the ledger, which means
    /// the ledger may be stale.
    pub fn seconds_until_final_leap(&self, posix_seconds: i64) -> i64 {
        self.last()
            .map_or(i64::MIN, LeapSecond::occurs_at_posix_seconds)
            .saturating_sub(posix_seconds)
    }

    /// `true` once `posix_seconds` lies past the last known correction.
    #[inline]
    pub fn is_stale(&self, posix_seconds: i64) -> bool {
        self.seconds_until_final_leap(posix_seconds) < 0
    }

    /// Seconds since the TAI epoch for a POSIX second count.
    #[inline]
    pub fn tai_seconds_from_posix(&self, posix_seconds: i64) -> i64 {
        posix_seconds - Epoch::Tai.posix_seconds() + i64::from(self.offset(posix_seconds))
    }

    /// Inverse of [`tai_seconds_from_posix`](Self::tai_seconds_from_posix).
    ///
    /// Records are searched from the most recent backwards for the first one
    /// whose offset places the result at or after its occurrence.  The TAI
    /// second of an inserted leap second lands on the POSIX second following
    /// it; after a removed second the later of the two candidates wins.
    pub fn posix_seconds_from_tai(&self, tai_seconds: i64) -> i64 {
        let aligned = tai_seconds.saturating_add(Epoch::Tai.posix_seconds());
        self.records
            .iter()
            .rev()
            .find_map(|r| {
                let posix = aligned.saturating_sub(i64::from(r.offset));
                (posix >= r.occurs_at_posix_seconds).then_some(posix)
            })
            .unwrap_or(aligned.saturating_sub(i64::from(BASE_TAI_MINUS_UTC)))
    }

    /// The first record after `posix_seconds`, or the infinity sentinel.
    pub fn next_leap_after(&self, posix_seconds: i64) -> &LeapSecond {
        let after = self
            .records
            .partition_point(|r| r.occurs_at_posix_seconds <= posix_seconds);
        self.records.get(after).unwrap_or(&self.infinity)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// All records in chronological order.
    #[inline]
    pub fn records(&self) -> &[LeapSecond] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent real record.
    #[inline]
    pub fn last(&self) -> Option<&LeapSecond> {
        self.records.last()
    }

    /// Sentinel dated 9999-12-31 carrying the final offset.
    #[inline]
    pub fn infinity(&self) -> &LeapSecond {
        &self.infinity
    }

    /// TAI − UTC after the last record.
    #[inline]
    pub fn final_offset(&self) -> i32 {
        self.infinity.offset
    }
}

impl FromStr for LeapSecondTable {
    type Err = TimeError;

    /// Parse with [`LeapTableConfig::default`].
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text, &LeapTableConfig::default())
    }
}
