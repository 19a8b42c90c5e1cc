// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second aware time primitives.
//!
//! This crate converts between civil UTC time and the continuous atomic time
//! scales used by navigation and identifier systems, with exact integer
//! arithmetic throughout.
//!
//! # Core types
//!
//! - [`Posix`]: a UTC instant, calendar fields plus POSIX seconds.
//! - [`LeapSecondTable`]: an immutable TAI − UTC ledger loaded from a
//!   tz-style `leapseconds` file.
//! - [`Time<S>`]: generic atomic instant parameterised by a [`TimeScale`]
//!   marker.
//! - [`TaiInstant`] / [`GpsInstant`]: aliases for `Time<TAI>` / `Time<GPS>`.
//! - [`Tick60Instant`]: 100 ns ticks since 1582-10-15 in 60 bits.
//! - [`GpsWeek`]: one GPS week as a half-open Tick60 range.
//! - [`Interval<T>`] / [`Period<S>`]: half-open ranges of instants.
//! - [`TickGenerator`] / [`AnchoredClock`]: strictly increasing
//!   [`TickSource`]s.
//!
//! # Time scales
//!
//! | Marker | Scale | Epoch |
//! |--------|-------|-------|
//! | [`TAI`] | International Atomic Time | 1958-01-01 |
//! | [`GPS`] | GPS Time | 1980-01-06 |
//!
//! Moving between POSIX and an atomic scale needs a [`LeapSecondTable`];
//! moving between atomic scales and Tick60 does not.
//!
//! ```
//! use leaptick::{GpsInstant, LeapSecondTable, LeapTableConfig, Posix, TaiInstant};
//!
//! let ledger = "\
//! Leap 1972 Jun 30 23:59:60 + S
//! Leap 1972 Dec 31 23:59:60 + S
//! ";
//! let table = LeapSecondTable::parse(ledger, &LeapTableConfig::new().with_minimum_entries(2))?;
//! assert_eq!(table.final_offset(), 12);
//!
//! let posix = Posix::midnight(1973, 1, 1);
//! let tai = TaiInstant::from_posix(&posix, &table);
//! let gps: GpsInstant = tai.to();
//! assert_eq!(gps.to_posix(&table), posix);
//! # Ok::<(), leaptick::TimeError>(())
//! ```

pub mod clock;
pub mod config;
pub mod epoch;
pub mod error;
mod gps;
pub(crate) mod instant;
pub mod julian;
pub mod leap;
mod period;
mod posix;
pub(crate) mod scales;
mod tick60;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use clock::{AnchoredClock, SystemClock, TickGenerator, TickSource, WallClock};
pub use config::LeapTableConfig;
pub use epoch::Epoch;
pub use error::{TimeError, TimeResult};
pub use gps::{GpsWeek, SECONDS_PER_WEEK, WEEKS_PER_CYCLE};
pub use instant::{Time, TimeScale};
pub use leap::{Direction, LeapSecond, LeapSecondTable, SharedLeapTable};
pub use period::{Interval, Period};
pub use posix::Posix;
pub use scales::{GPS, TAI};
pub use tick60::Tick60Instant;

// ── Type aliases ──────────────────────────────────────────────────────────

/// International Atomic Time instant.
///
/// This is a type alias for [`Time<TAI>`].
pub type TaiInstant = Time<TAI>;

/// GPS Time instant.
///
/// This is a type alias for [`Time<GPS>`].  Week-number accessors live on
/// this type: `cycle()`, `week()`, `seconds_of_week()`.
pub type GpsInstant = Time<GPS>;
