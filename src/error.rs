// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for ledger loading, text parsing and range checks.
//!
//! | Variant | Raised by | Kind |
//! |---------|-----------|------|
//! | [`Io`](TimeError::Io) | [`LeapSecondTable::from_file`](crate::LeapSecondTable::from_file) | I/O |
//! | [`MalformedRecord`](TimeError::MalformedRecord) | ledger parser | format |
//! | [`UnknownMonth`](TimeError::UnknownMonth) | ledger parser | format |
//! | [`InsufficientEntries`](TimeError::InsufficientEntries) | ledger loader | data integrity |
//! | [`InvalidFormat`](TimeError::InvalidFormat) | `FromStr` / binary decoders | format |
//! | [`InvalidCalendar`](TimeError::InvalidCalendar) | [`Posix::try_from_calendar`](crate::Posix::try_from_calendar) | format |
//! | [`OutOfRange`](TimeError::OutOfRange) | Tick60 conversions and parsing | range |
//!
//! Programmer errors (calendar fields out of range passed to the asserting
//! constructors, negative GPS weeks, ...) are not represented here: they panic.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type TimeResult<T> = Result<T, TimeError>;

/// Unified error type for the recoverable failure modes of this crate.
#[derive(Error, Debug)]
pub enum TimeError {
    /// The leap-second ledger could not be read.
    #[error("cannot read leap-second ledger {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `Leap` line of the ledger does not follow the record grammar.
    #[error("malformed leap-second record on line {line}: {reason} (\"{text}\")")]
    MalformedRecord {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// A ledger record names a month that is not a three-letter English abbreviation.
    #[error("\"{0}\" cannot be parsed into a month")]
    UnknownMonth(String),

    /// The ledger holds fewer records than the configured minimum.
    #[error("leap-second ledger has {found} entries, at least {required} are required")]
    InsufficientEntries { found: usize, required: usize },

    /// Text or bytes do not match the strict format of the target type.
    #[error("invalid {kind} format: \"{text}\"")]
    InvalidFormat { kind: &'static str, text: String },

    /// Calendar fields outside their valid ranges.
    #[error("invalid calendar value {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidCalendar {
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    },

    /// A value lies outside the representable range of the target type.
    #[error("{kind} value {value} is outside the representable range")]
    OutOfRange { kind: &'static str, value: i128 },
}

impl TimeError {
    pub(crate) fn invalid_format(kind: &'static str, text: impl Into<String>) -> Self {
        Self::InvalidFormat {
            kind,
            text: text.into(),
        }
    }

    pub(crate) fn out_of_range(kind: &'static str, value: impl Into<i128>) -> Self {
        Self::OutOfRange {
            kind,
            value: value.into(),
        }
    }

    /// `true` for errors caused by the shape or content of an input.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. }
                | Self::UnknownMonth(_)
                | Self::InvalidFormat { .. }
                | Self::InvalidCalendar { .. }
                | Self::OutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = TimeError::UnknownMonth("Foo".into());
        assert_eq!(err.to_string(), "\"Foo\" cannot be parsed into a month");

        let err = TimeError::InsufficientEntries {
            found: 5,
            required: 25,
        };
        assert!(err.to_string().contains("5 entries"));
        assert!(!err.is_format_error());
    }

    #[test]
    fn format_errors_are_classified() {
        assert!(TimeError::invalid_format("TAI", "abc").is_format_error());
        assert!(TimeError::out_of_range("Tick60", -1i64).is_format_error());
    }
}
