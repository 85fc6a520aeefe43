//! The 24-hour window a run selects rows for
//!
//! The window is anchored to a fixed civil offset rather than a timezone
//! database, and targets the day *after* the current civil day so that the
//! sheet lists tomorrow's pickups and deliveries.

use crate::error::{LogisticsError, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};

/// Half-open `[start, end)` interval exactly 24 hours wide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Civil offset the window was computed for
    #[cfg_attr(feature = "serde", serde(skip))]
    pub offset: FixedOffset,
}

impl DateWindow {
    /// Compute the window for `reference` in a civil zone `utc_offset_hours`
    /// behind UTC (4 for EDT, -1 for CET).
    ///
    /// `start = floor_to_utc_day(reference - h) + h + 24h` and
    /// `end = start + 24h`.
    pub fn current(reference: DateTime<Utc>, utc_offset_hours: i32) -> Result<Self> {
        let offset = civil_offset(utc_offset_hours)?;
        let shift = Duration::hours(i64::from(utc_offset_hours));

        let civil_day = (reference - shift).date_naive();
        let start = civil_day.and_time(NaiveTime::MIN).and_utc() + shift + Duration::hours(24);
        let end = start + Duration::hours(24);

        Ok(DateWindow { start, end, offset })
    }

    /// Whether `instant` lies inside `[start, end)`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Window start expressed in the civil offset
    pub fn start_civil(&self) -> DateTime<FixedOffset> {
        self.start.with_timezone(&self.offset)
    }
}

/// Fixed offset for a zone `utc_offset_hours` behind UTC
pub fn civil_offset(utc_offset_hours: i32) -> Result<FixedOffset> {
    utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::west_opt)
        .ok_or(LogisticsError::InvalidUtcOffset(utc_offset_hours))
}
