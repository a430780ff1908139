//! Store operating hours and clock advancement
//!
//! This module contains the operating window check, the single forward deferral
//! applied to visits that arrive while the store is closed, and the seasonal
//! shape of the inter-arrival gap distribution.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::config::store_hours;

/// Operating window of the store with its out-of-hours deferral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    /// First hour (inclusive) at which a visit is accepted as-is
    opening_hour: u32,
    /// Last hour (inclusive) at which a visit is accepted as-is
    closing_hour: u32,
    /// Hours added once to a visit arriving outside the window
    deferral_hours: u32,
}

impl OperatingHours {
    /// Create an operating window
    pub fn new(opening_hour: u32, closing_hour: u32, deferral_hours: u32) -> Self {
        Self { opening_hour, closing_hour, deferral_hours }
    }

    /// The 9:00 to 21:00 window with a 12 hour deferral
    pub fn standard() -> Self {
        Self::new(store_hours::OPENING_HOUR, store_hours::CLOSING_HOUR, store_hours::DEFERRAL_HOURS)
    }

    /// First accepted hour
    pub fn opening_hour(&self) -> u32 {
        self.opening_hour
    }

    /// Last accepted hour
    pub fn closing_hour(&self) -> u32 {
        self.closing_hour
    }

    /// Deferral applied to out-of-window arrivals
    pub fn deferral_hours(&self) -> u32 {
        self.deferral_hours
    }

    /// Check if an hour of the day falls inside the window (both ends inclusive)
    pub fn is_open(&self, hour: u32) -> bool {
        (self.opening_hour..=self.closing_hour).contains(&hour)
    }

    /// Check if a timestamp falls inside the window
    pub fn is_within(&self, timestamp: NaiveDateTime) -> bool {
        self.is_open(timestamp.hour())
    }

    /// Advance the clock by a whole number of hours
    ///
    /// When the arrival lands outside the window it is pushed forward by the
    /// deferral exactly once; the result is not re-checked. Returns the new clock
    /// and whether the deferral fired, or `None` past the representable range.
    pub fn advance(&self, clock: NaiveDateTime, gap_hours: i64) -> Option<(NaiveDateTime, bool)> {
        let arrival = clock.checked_add_signed(Duration::try_hours(gap_hours)?)?;

        if self.is_within(arrival) {
            return Some((arrival, false));
        }

        let deferred =
            arrival.checked_add_signed(Duration::hours(i64::from(self.deferral_hours)))?;
        trace!(%arrival, %deferred, "Deferred out-of-hours arrival");
        Some((deferred, true))
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shape of the Gamma inter-arrival distribution for a calendar month
///
/// `0.5 * (12 - |month - 6|)`: 6.0 in June, 3.5 in January, 3.0 in December.
/// With unit scale the mean gap equals the shape, so winter months see the
/// shortest gaps.
pub fn seasonal_shape(month: u32) -> f64 {
    0.5 * (12.0 - (f64::from(month) - 6.0).abs())
}
