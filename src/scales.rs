// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies an atomic time scale and encodes the fixed
//! offset between its epoch and the canonical **TAI** count.
//!
//! | Marker | Epoch | `TAI − scale` | Text suffix |
//! |--------|-------|---------------|-------------|
//! | [`TAI`] | 1958-01-01 | 0 s | `TAI` |
//! | [`GPS`] | 1980-01-06 | 694 656 019 s | `TAI` |
//!
//! The GPS text form reuses the `TAI` suffix so that values already stored in
//! that form keep parsing; [`TimeScale::LABEL`] is still `"GPS"`.

use super::epoch::{TAI_MINUS_GPS, TAI_TO_GPS};
use super::instant::TimeScale;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// International Atomic Time, seconds since 1958-01-01T00:00:00.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TAI;

impl TimeScale for TAI {
    const LABEL: &'static str = "TAI";
    const TEXT_SUFFIX: &'static str = "TAI";
    const TAI_OFFSET_SECONDS: i64 = 0;
}

/// GPS Time, seconds since 1980-01-06T00:00:00.
///
/// `TAI = GPS + 694 656 000 s + 19 s`: the distance between the epochs plus
/// the TAI − GPS offset frozen at the GPS epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GPS;

impl TimeScale for GPS {
    const LABEL: &'static str = "GPS";
    const TEXT_SUFFIX: &'static str = "TAI";
    const TAI_OFFSET_SECONDS: i64 = TAI_TO_GPS + TAI_MINUS_GPS;
}

// ---------------------------------------------------------------------------
// Cross-scale From impls
// ---------------------------------------------------------------------------

/// Generate `From<Time<A>> for Time<B>` for every ordered pair of scales.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::instant::Time<$first>> for super::instant::Time<$rest> {
                #[inline]
                fn from(t: super::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::instant::Time<$rest>> for super::instant::Time<$first> {
                #[inline]
                fn from(t: super::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(TAI, GPS);
