//! Simulated time model.
//!
//! # Design
//!
//! Time is a continuous `f64` count of simulated hours since the start of a
//! replication.  Event-driven models jump straight from one event time to the
//! next, so there is no fixed tick; the clock only ever moves forward to the
//! time of the event being dispatched.
//!
//! Models that think in other units (days, years) convert at their edges
//! with the constants below.  Nothing here touches the wall clock.

use std::fmt;

/// Simulated hours since the start of a replication.
pub type SimTime = f64;

pub const HOURS_PER_DAY:  f64 = 24.0;
pub const DAYS_PER_YEAR:  f64 = 365.0;
pub const HOURS_PER_YEAR: f64 = DAYS_PER_YEAR * HOURS_PER_DAY;

/// Convert whole or fractional days to simulated hours.
#[inline]
pub fn days_to_hours(days: f64) -> SimTime {
    days * HOURS_PER_DAY
}

/// Convert years to simulated hours (365-day years).
#[inline]
pub fn years_to_hours(years: f64) -> SimTime {
    years * HOURS_PER_YEAR
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The replication clock.
///
/// `SimClock` is cheap to copy and holds no heap data.  It is advanced only
/// by the simulator's main loop, to the time of each dispatched event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub const START: SimClock = SimClock { now: 0.0 };

    pub fn new() -> Self {
        Self::START
    }

    /// Current simulated time in hours.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `time`.
    ///
    /// # Panics
    /// Panics in debug mode if `time` is earlier than the current time; the
    /// event queue guarantees this never happens inside the main loop.
    #[inline]
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(
            time >= self.now,
            "clock moved backwards: {} -> {}",
            self.now,
            time
        );
        self.now = time;
    }

    /// Index of the period (0-based) that contains `now`, for a period length
    /// of `period` hours.  Returns 0 for non-positive periods.
    #[inline]
    pub fn period_index(&self, period: SimTime) -> u64 {
        if period > 0.0 {
            (self.now / period).floor() as u64
        } else {
            0
        }
    }

    /// Break elapsed time into (day, hour, minute) components.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_minutes = (self.now.max(0.0) * 60.0).floor() as u64;
        let days = total_minutes / (24 * 60);
        let hours = ((total_minutes % (24 * 60)) / 60) as u32;
        let minutes = (total_minutes % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "t={:.2}h (day {} {:02}:{:02})", self.now, d, h, m)
    }
}
