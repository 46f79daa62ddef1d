//! Availability ledger: system of record for appointments and blocked time.
//!
//! The ledger accepts overlapping bookings and blocks as-is. Conflict checks
//! ([`AvailabilityLedger::check_availability`],
//! [`AvailabilityLedger::available_slots`]) are read-only queries a caller
//! may consult before booking.
//!
//! Each collection sits behind its own mutex, held for the whole of an
//! operation. When both are needed they are locked appointments-first.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::appointment::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
use super::blocked::{BlockedTime, NewBlockedTime};
use super::slots::{BusyRange, BusyRanges, SlotFinder, TimeSlot};
use crate::error::{CoreError, Result, ValidationError};
use crate::storage::AvailabilityConfig;
use crate::time::{parse_timestamp, DayWindow};

const APPOINTMENT: &str = "Appointment";
const BLOCKED_TIME: &str = "Blocked time";
const FULL_DAY_BLOCK: &str = "Full-day block";

/// Serializable copy of the ledger contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub blocked_times: Vec<BlockedTime>,
}

/// Appointments and blocked ranges for all trainers.
pub struct AvailabilityLedger {
    config: AvailabilityConfig,
    appointments: Mutex<Vec<Appointment>>,
    blocked_times: Mutex<Vec<BlockedTime>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Mutations complete before their guard drops, so a poisoned collection
    // is still consistent.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Parse a timestamp that was validated on entry. Records restored from a
/// hand-edited state file may still be malformed; those are skipped.
fn stored_instant(record_id: &str, value: &str) -> Option<NaiveDateTime> {
    match parse_timestamp("stored", value) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(record_id, error = %e, "skipping record with unparsable timestamp");
            None
        }
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

impl AvailabilityLedger {
    /// Empty ledger with default working hours.
    pub fn new() -> Self {
        Self::with_config(AvailabilityConfig::default())
    }

    pub fn with_config(config: AvailabilityConfig) -> Self {
        Self {
            config,
            appointments: Mutex::new(Vec::new()),
            blocked_times: Mutex::new(Vec::new()),
        }
    }

    /// Restore a ledger from a previously taken snapshot.
    pub fn from_snapshot(config: AvailabilityConfig, snapshot: LedgerSnapshot) -> Self {
        Self {
            config,
            appointments: Mutex::new(snapshot.appointments),
            blocked_times: Mutex::new(snapshot.blocked_times),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let appointments = lock(&self.appointments).clone();
        let blocked_times = lock(&self.blocked_times).clone();
        LedgerSnapshot {
            appointments,
            blocked_times,
        }
    }

    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    // ── Appointments ─────────────────────────────────────────────────

    pub fn list_appointments(&self) -> Vec<Appointment> {
        lock(&self.appointments).clone()
    }

    /// Appointments where the user is either the trainer or the client.
    pub fn list_appointments_for_user(&self, user_id: &str) -> Vec<Appointment> {
        lock(&self.appointments)
            .iter()
            .filter(|a| a.involves(user_id))
            .cloned()
            .collect()
    }

    /// Appointments starting inside the day window of `date`, cancelled ones
    /// included.
    pub fn list_appointments_by_date(&self, date: &str) -> Result<Vec<Appointment>> {
        let window = DayWindow::parse(date)?;
        let appointments = lock(&self.appointments);
        let found: Vec<Appointment> = appointments
            .iter()
            .filter(|a| {
                stored_instant(&a.id, &a.start_time).is_some_and(|start| window.contains(start))
            })
            .cloned()
            .collect();
        debug!(date = %window.date(), count = found.len(), "appointments by date");
        Ok(found)
    }

    /// Book an appointment. Status is always `scheduled`; neither ordering of
    /// start/end nor overlap with existing bookings is checked.
    pub fn create_appointment(&self, request: NewAppointment) -> Result<Appointment> {
        request.validate()?;
        let appointment = request.into_appointment(new_id("apt"));
        lock(&self.appointments).push(appointment.clone());
        info!(
            id = %appointment.id,
            trainer_id = %appointment.trainer_id,
            client_id = %appointment.client_id,
            "appointment created"
        );
        Ok(appointment)
    }

    /// Apply the fields present in `patch`; absent fields keep their values.
    pub fn update_appointment(&self, id: &str, patch: &AppointmentPatch) -> Result<Appointment> {
        patch.validate()?;
        let mut appointments = lock(&self.appointments);
        let slot = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::not_found(APPOINTMENT, id))?;
        let updated = patch.apply(slot);
        *slot = updated.clone();
        info!(id, status = %updated.status, "appointment updated");
        Ok(updated)
    }

    pub fn cancel_appointment(&self, id: &str) -> Result<Appointment> {
        self.update_appointment(
            id,
            &AppointmentPatch {
                status: Some(AppointmentStatus::Cancelled),
                ..Default::default()
            },
        )
    }

    pub fn delete_appointment(&self, id: &str) -> Result<()> {
        let mut appointments = lock(&self.appointments);
        let Some(index) = appointments.iter().position(|a| a.id == id) else {
            warn!(id, "delete of unknown appointment");
            return Err(CoreError::not_found(APPOINTMENT, id));
        };
        appointments.remove(index);
        info!(id, "appointment deleted");
        Ok(())
    }

    // ── Blocked time ─────────────────────────────────────────────────

    pub fn list_blocked_times(&self) -> Vec<BlockedTime> {
        lock(&self.blocked_times).clone()
    }

    /// Blocked ranges starting inside the day window of `date`.
    pub fn list_blocked_times_by_date(&self, date: &str) -> Result<Vec<BlockedTime>> {
        let window = DayWindow::parse(date)?;
        let blocked = lock(&self.blocked_times);
        let found: Vec<BlockedTime> = blocked
            .iter()
            .filter(|b| {
                stored_instant(&b.id, &b.start_time).is_some_and(|start| window.contains(start))
            })
            .cloned()
            .collect();
        debug!(date = %window.date(), count = found.len(), "blocked times by date");
        Ok(found)
    }

    /// Append a blocked range as given. Overlapping blocks are not merged.
    pub fn create_blocked_time(&self, request: NewBlockedTime) -> Result<BlockedTime> {
        request.validate()?;
        let blocked = request.into_blocked_time(new_id("block"));
        lock(&self.blocked_times).push(blocked.clone());
        info!(id = %blocked.id, trainer_id = %blocked.trainer_id, "blocked time created");
        Ok(blocked)
    }

    /// Block the whole calendar day containing `date`.
    pub fn block_full_day(
        &self,
        trainer_id: &str,
        date: &str,
        reason: Option<&str>,
    ) -> Result<BlockedTime> {
        let window = DayWindow::parse(date)?;
        let reason = reason
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_block_reason.clone());
        let blocked = BlockedTime::full_day(new_id("block-day"), trainer_id, window, reason);
        lock(&self.blocked_times).push(blocked.clone());
        info!(id = %blocked.id, trainer_id, date = %window.date(), "full day blocked");
        Ok(blocked)
    }

    /// Remove every full-day block of the trainer starting at midnight of
    /// `date`. Returns how many were removed.
    pub fn unblock_full_day(&self, trainer_id: &str, date: &str) -> Result<usize> {
        let window = DayWindow::parse(date)?;
        let mut blocked = lock(&self.blocked_times);
        let is_target = |b: &BlockedTime| {
            b.trainer_id == trainer_id
                && b.is_full_day
                && stored_instant(&b.id, &b.start_time) == Some(window.start)
        };

        let before = blocked.len();
        if !blocked.iter().any(|b| is_target(b)) {
            warn!(trainer_id, date = %window.date(), "no full-day block to remove");
            return Err(CoreError::not_found(
                FULL_DAY_BLOCK,
                format!("{trainer_id} on {}", window.date()),
            ));
        }
        blocked.retain(|b| !is_target(b));
        let removed = before - blocked.len();
        info!(trainer_id, date = %window.date(), removed, "full day unblocked");
        Ok(removed)
    }

    pub fn delete_blocked_time(&self, id: &str) -> Result<()> {
        let mut blocked = lock(&self.blocked_times);
        let Some(index) = blocked.iter().position(|b| b.id == id) else {
            warn!(id, "delete of unknown blocked time");
            return Err(CoreError::not_found(BLOCKED_TIME, id));
        };
        blocked.remove(index);
        info!(id, "blocked time deleted");
        Ok(())
    }

    // ── Availability queries ─────────────────────────────────────────

    /// Whether the trainer has a full-day block starting on `date`.
    pub fn is_day_fully_blocked(&self, trainer_id: &str, date: &str) -> Result<bool> {
        let window = DayWindow::parse(date)?;
        Ok(self.full_day_blocked_in(trainer_id, window))
    }

    /// True when `[start, end)` collides with none of the trainer's
    /// non-cancelled appointments or blocked ranges.
    pub fn check_availability(&self, trainer_id: &str, start: &str, end: &str) -> Result<bool> {
        let start = parse_timestamp("startTime", start)?;
        let end = parse_timestamp("endTime", end)?;
        let free = self.busy_ranges(trainer_id).is_free(start, end);
        debug!(trainer_id, %start, %end, free, "availability checked");
        Ok(free)
    }

    /// Bookable slots of `duration_minutes` for the trainer on `date`.
    pub fn available_slots(
        &self,
        trainer_id: &str,
        date: &str,
        duration_minutes: i64,
    ) -> Result<Vec<TimeSlot>> {
        if duration_minutes <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "durationMinutes".into(),
                message: format!("must be positive, got {duration_minutes}"),
            }
            .into());
        }
        let working_minutes = self.config.working_minutes();
        if duration_minutes > working_minutes {
            return Err(ValidationError::InvalidValue {
                field: "durationMinutes".into(),
                message: format!(
                    "{duration_minutes} exceeds the {working_minutes} minute working day"
                ),
            }
            .into());
        }
        let window = DayWindow::parse(date)?;
        if self.full_day_blocked_in(trainer_id, window) {
            debug!(trainer_id, date = %window.date(), "day fully blocked, no slots");
            return Ok(Vec::new());
        }
        let busy = self.busy_ranges(trainer_id);
        Ok(SlotFinder::new(&self.config).find(window, duration_minutes, &busy))
    }

    fn full_day_blocked_in(&self, trainer_id: &str, window: DayWindow) -> bool {
        lock(&self.blocked_times).iter().any(|b| {
            b.trainer_id == trainer_id
                && b.is_full_day
                && stored_instant(&b.id, &b.start_time).is_some_and(|start| window.contains(start))
        })
    }

    fn busy_ranges(&self, trainer_id: &str) -> BusyRanges {
        let appointments = lock(&self.appointments);
        let blocked = lock(&self.blocked_times);

        let booked = appointments
            .iter()
            .filter(|a| a.trainer_id == trainer_id && !a.is_cancelled())
            .filter_map(|a| {
                Some(BusyRange::new(
                    stored_instant(&a.id, &a.start_time)?,
                    stored_instant(&a.id, &a.end_time)?,
                ))
            });
        let held = blocked
            .iter()
            .filter(|b| b.trainer_id == trainer_id)
            .filter_map(|b| {
                Some(BusyRange::new(
                    stored_instant(&b.id, &b.start_time)?,
                    stored_instant(&b.id, &b.end_time)?,
                ))
            });

        BusyRanges::new(booked.chain(held).collect())
    }
}

impl Default for AvailabilityLedger {
    fn default() -> Self {
        Self::new()
    }
}
