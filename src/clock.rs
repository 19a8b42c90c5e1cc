// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Strictly increasing Tick60 sources.
//!
//! Two sources implement [`TickSource`]:
//!
//! - [`TickGenerator`] samples a millisecond wall clock on every call and
//!   bumps past the last issued tick when the clock has not advanced.
//! - [`AnchoredClock`] reads the wall clock once, then advances with the
//!   monotonic [`std::time::Instant`] so wall-clock steps cannot move it.
//!
//! Both are civil counts (no leap-second table) and both guarantee that every
//! returned tick is strictly greater than all earlier ones from the same
//! source, across threads.

use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;

use crate::epoch::LILIAN_TO_POSIX_TICKS;
use crate::tick60::Tick60Instant;

/// Ticks per millisecond.
const TICKS_PER_MILLI: i64 = 10_000;

/// Pause after anchoring so the first ticks do not collide with values handed
/// out by a source created just before.
const ANCHOR_SETTLE: Duration = Duration::from_millis(3);

/// A millisecond-resolution wall clock.
pub trait WallClock: Send + Sync {
    /// Milliseconds since 1970-01-01T00:00:00Z.
    fn now_millis(&self) -> i64;
}

/// The operating-system clock, read through chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    #[inline]
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A source of strictly increasing Tick60 values.
pub trait TickSource: Send + Sync {
    /// # Panics
    ///
    /// Once [`Tick60Instant::MAX`] has been issued, since no greater value
    /// exists. A wall clock reading past the year 5236 gets there.
    fn next_tick(&self) -> Tick60Instant;
}

fn ticks_from_millis(millis: i64) -> u64 {
    let ticks = i128::from(millis) * i128::from(TICKS_PER_MILLI) + i128::from(LILIAN_TO_POSIX_TICKS);
    ticks.clamp(0, i128::from(Tick60Instant::MAX.ticks())) as u64
}

/// Issue `candidate` if it is past the last issued tick, else one past it.
fn issue(last: &Mutex<Option<u64>>, candidate: impl FnOnce() -> u64) -> Tick60Instant {
    let mut last = last.lock();
    let candidate = candidate();
    let tick = match *last {
        Some(prev) if candidate <= prev => prev
            .checked_add(1)
            .filter(|t| *t <= Tick60Instant::MAX.ticks())
            .unwrap_or_else(|| panic!("Tick60 range exhausted")),
        _ => candidate,
    };
    *last = Some(tick);
    Tick60Instant::new(tick)
}

// ═══════════════════════════════════════════════════════════════════════════
// TickGenerator
// ═══════════════════════════════════════════════════════════════════════════

/// Wall-clock driven source with millisecond granularity.
///
/// Within one millisecond successive calls return `t, t+1, t+2, …`.
#[derive(Debug)]
pub struct TickGenerator<C: WallClock = SystemClock> {
    clock: C,
    last: Mutex<Option<u64>>,
}

impl TickGenerator {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TickGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: WallClock> TickGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last: Mutex::new(None),
        }
    }

    /// The most recently issued tick, if any.
    pub fn last_issued(&self) -> Option<Tick60Instant> {
        let last = *self.last.lock();
        last.map(Tick60Instant::new)
    }
}

impl<C: WallClock> TickSource for TickGenerator<C> {
    fn next_tick(&self) -> Tick60Instant {
        issue(&self.last, || ticks_from_millis(self.clock.now_millis()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// AnchoredClock
// ═══════════════════════════════════════════════════════════════════════════

/// Wall clock read once at construction, then advanced monotonically.
#[derive(Debug)]
pub struct AnchoredClock {
    anchor_tick: u64,
    anchor: Instant,
    last: Mutex<Option<u64>>,
}

impl AnchoredClock {
    /// Anchor on the system clock.
    ///
    /// Blocks for a few milliseconds.
    pub fn new() -> Self {
        Self::anchored_on(&SystemClock)
    }

    /// Anchor on `clock`.
    pub fn anchored_on(clock: &impl WallClock) -> Self {
        let anchor = Instant::now();
        let anchor_tick = ticks_from_millis(clock.now_millis());
        debug!(anchor_tick, "anchored Tick60 clock");
        std::thread::sleep(ANCHOR_SETTLE);
        Self {
            anchor_tick,
            anchor,
            last: Mutex::new(None),
        }
    }

    /// The tick value read from the wall clock at construction.
    #[inline]
    pub fn anchor(&self) -> Tick60Instant {
        Tick60Instant::new(self.anchor_tick)
    }

    fn candidate(&self) -> u64 {
        let elapsed = (self.anchor.elapsed().as_nanos() / 100) as u64;
        self.anchor_tick
            .saturating_add(elapsed)
            .min(Tick60Instant::MAX.ticks())
    }
}

impl Default for AnchoredClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for AnchoredClock {
    fn next_tick(&self) -> Tick60Instant {
        issue(&self.last, || self.candidate())
    }
}
