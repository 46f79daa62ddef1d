//! Daily check-in tracker.
//!
//! Each user owns a set of day markers. Every derived value (streak length,
//! last check-in, checked-in-today) is computed from that set on demand, so
//! backfilled or out-of-order markers need no extra bookkeeping.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Serializable copy of every user's markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSnapshot {
    #[serde(default)]
    pub check_ins: BTreeMap<String, Vec<NaiveDate>>,
}

/// Derived engagement facts for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub user_id: String,
    pub current_streak: u32,
    pub total_check_in_days: usize,
    pub last_check_in: Option<NaiveDateTime>,
    pub checked_in_today: bool,
}

/// Length of the run of consecutive days ending at the latest marker.
///
/// `markers` may be unsorted; duplicates are tolerated.
pub fn streak_length(markers: &[NaiveDate]) -> u32 {
    let mut sorted = markers.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let Some((&latest, earlier)) = sorted.split_last() else {
        return 0;
    };

    let mut streak = 1;
    let mut anchor = latest;
    for &day in earlier.iter().rev() {
        if anchor.pred_opt() != Some(day) {
            break;
        }
        streak += 1;
        anchor = day;
    }
    streak
}

fn as_midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Per-user check-in markers behind a single lock.
pub struct StreakTracker {
    check_ins: Mutex<HashMap<String, Vec<NaiveDate>>>,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self {
            check_ins: Mutex::new(HashMap::new()),
        }
    }

    /// Restore markers, collapsing repeated days for the same user.
    pub fn from_snapshot(snapshot: StreakSnapshot) -> Self {
        let check_ins = snapshot
            .check_ins
            .into_iter()
            .map(|(user, mut days)| {
                days.sort_unstable();
                days.dedup();
                (user, days)
            })
            .collect();
        Self {
            check_ins: Mutex::new(check_ins),
        }
    }

    pub fn snapshot(&self) -> StreakSnapshot {
        StreakSnapshot {
            check_ins: self
                .lock()
                .iter()
                .map(|(user, days)| (user.clone(), days.clone()))
                .collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<NaiveDate>>> {
        self.check_ins.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn markers(&self, user_id: &str) -> Vec<NaiveDate> {
        self.lock().get(user_id).cloned().unwrap_or_default()
    }

    // ── Recording ────────────────────────────────────────────────────

    /// Check the user in for the current UTC day.
    pub fn check_in(&self, user_id: &str) -> NaiveDateTime {
        self.check_in_at(user_id, Utc::now().naive_utc())
    }

    /// Check the user in for the day containing `now`. Returns that day's
    /// midnight. A second call on the same day changes nothing.
    pub fn check_in_at(&self, user_id: &str, now: NaiveDateTime) -> NaiveDateTime {
        self.check_in_on(user_id, now.date())
    }

    /// Record a check-in for an explicit day, e.g. when backfilling.
    pub fn check_in_on(&self, user_id: &str, day: NaiveDate) -> NaiveDateTime {
        let mut check_ins = self.lock();
        let days = check_ins.entry(user_id.to_string()).or_default();
        if days.contains(&day) {
            debug!(user_id, %day, "already checked in");
        } else {
            days.push(day);
            info!(user_id, %day, "checked in");
        }
        as_midnight(day)
    }

    /// Clear every marker of the user. The user stays known with an empty set.
    pub fn reset_streak(&self, user_id: &str) {
        self.lock().insert(user_id.to_string(), Vec::new());
        info!(user_id, "streak reset");
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Consecutive days ending at the most recent check-in, which is not
    /// necessarily today.
    pub fn get_streak(&self, user_id: &str) -> u32 {
        streak_length(&self.markers(user_id))
    }

    pub fn get_last_check_in(&self, user_id: &str) -> Option<NaiveDateTime> {
        self.markers(user_id).into_iter().max().map(as_midnight)
    }

    pub fn has_checked_in_today(&self, user_id: &str) -> bool {
        self.has_checked_in_on(user_id, Utc::now().naive_utc())
    }

    pub fn has_checked_in_on(&self, user_id: &str, now: NaiveDateTime) -> bool {
        self.lock()
            .get(user_id)
            .is_some_and(|days| days.contains(&now.date()))
    }

    /// Number of distinct days the user has checked in.
    pub fn total_check_in_days(&self, user_id: &str) -> usize {
        self.lock().get(user_id).map_or(0, Vec::len)
    }

    pub fn summary(&self, user_id: &str, now: NaiveDateTime) -> StreakSummary {
        let days = self.markers(user_id);
        StreakSummary {
            user_id: user_id.to_string(),
            current_streak: streak_length(&days),
            total_check_in_days: days.len(),
            last_check_in: days.iter().max().copied().map(as_midnight),
            checked_in_today: days.contains(&now.date()),
        }
    }
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new()
    }
}
