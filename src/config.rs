// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second ledger loading options.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default lower bound on the number of records a ledger must contain.
///
/// The IERS ledger held 27 records as of 2017; the threshold only has to be
/// high enough to catch a truncated or corrupt file.
pub const DEFAULT_MINIMUM_ENTRIES: usize = 25;

/// Options applied by [`LeapSecondTable::parse`](crate::LeapSecondTable::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeapTableConfig {
    /// A ledger with fewer records is rejected.
    pub minimum_entries: usize,
}

impl LeapTableConfig {
    pub const fn new() -> Self {
        Self {
            minimum_entries: DEFAULT_MINIMUM_ENTRIES,
        }
    }

    /// Replace the minimum-entry threshold.
    pub const fn with_minimum_entries(self, minimum_entries: usize) -> Self {
        Self { minimum_entries, ..self }
    }
}

impl Default for LeapTableConfig {
    fn default() -> Self {
        Self::new()
    }
}
