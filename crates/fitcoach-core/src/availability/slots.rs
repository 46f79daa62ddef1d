//! Busy-range bookkeeping and bookable slot search.
//!
//! Works on ranges already resolved to naive instants; the ledger collects
//! them for one trainer and hands them over so no lock is held during the
//! search.

use chrono::{Duration, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::storage::AvailabilityConfig;
use crate::time::{format_timestamp, DayWindow};

/// A bookable window returned by slot search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// `[start, end)` range occupied by an appointment or a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Half-open overlap: touching ranges do not collide.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && self.start < end
    }
}

/// Everything that makes a trainer unavailable on a calendar.
#[derive(Debug, Clone, Default)]
pub struct BusyRanges {
    ranges: Vec<BusyRange>,
}

impl BusyRanges {
    pub fn new(ranges: Vec<BusyRange>) -> Self {
        Self { ranges }
    }

    pub fn is_free(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        !self.ranges.iter().any(|r| r.overlaps(start, end))
    }
}

/// Walks the working hours of a day in fixed steps and keeps free slots.
pub struct SlotFinder<'a> {
    config: &'a AvailabilityConfig,
}

impl<'a> SlotFinder<'a> {
    pub fn new(config: &'a AvailabilityConfig) -> Self {
        Self { config }
    }

    /// Free slots of `duration_minutes` inside the working hours of `day`.
    ///
    /// Candidates start every `slot_interval_minutes` from the opening hour;
    /// a candidate must finish no later than the closing hour.
    pub fn find(
        &self,
        day: DayWindow,
        duration_minutes: i64,
        busy: &BusyRanges,
    ) -> Vec<TimeSlot> {
        let opening = day.start + Duration::hours(i64::from(self.config.working_hour_start));
        let closing = day.start + Duration::hours(i64::from(self.config.working_hour_end));
        let step = Duration::minutes(i64::from(self.config.slot_interval_minutes.max(1)));
        let Some(length) = TimeDelta::try_minutes(duration_minutes) else {
            return Vec::new();
        };

        let mut slots = Vec::new();
        let mut candidate = opening;
        while candidate < closing {
            let Some(slot_end) = candidate.checked_add_signed(length) else {
                break;
            };
            if slot_end <= closing && busy.is_free(candidate, slot_end) {
                slots.push(TimeSlot {
                    start: format_timestamp(candidate),
                    end: format_timestamp(slot_end),
                });
            }
            candidate += step;
        }
        slots
    }
}
