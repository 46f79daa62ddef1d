//! Blocked time ranges on a trainer's calendar.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{format_timestamp, parse_timestamp, DayWindow};

/// A range during which a trainer is not bookable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTime {
    pub id: String,
    pub trainer_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_full_day: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl BlockedTime {
    /// Full-day block covering `window`, with times rendered at midnight.
    pub(crate) fn full_day(
        id: String,
        trainer_id: &str,
        window: DayWindow,
        reason: String,
    ) -> Self {
        Self {
            id,
            trainer_id: trainer_id.to_string(),
            start_time: format_timestamp(window.start),
            end_time: format_timestamp(window.end),
            is_full_day: true,
            reason: Some(reason),
        }
    }
}

/// Request for an arbitrary blocked range. Stored verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlockedTime {
    pub trainer_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_full_day: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl NewBlockedTime {
    pub fn new(
        trainer_id: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            trainer_id: trainer_id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Default::default()
        }
    }

    pub fn full_day(mut self, is_full_day: bool) -> Self {
        self.is_full_day = is_full_day;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        parse_timestamp("startTime", &self.start_time)?;
        parse_timestamp("endTime", &self.end_time)?;
        Ok(())
    }

    pub(crate) fn into_blocked_time(self, id: String) -> BlockedTime {
        BlockedTime {
            id,
            trainer_id: self.trainer_id,
            start_time: self.start_time,
            end_time: self.end_time,
            is_full_day: self.is_full_day,
            reason: self.reason,
        }
    }
}
