//! # fitcoach Core Library
//!
//! Scheduling and engagement logic for a fitness-coaching back office.
//! Everything is available through the standalone `fitcoach-cli` binary,
//! which is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Availability Ledger**: appointments and blocked time per trainer,
//!   day-bucketed queries, full-day blocking and bookable slot search
//! - **Streak Tracker**: per-user daily check-in markers and the derived
//!   consecutive-day streak
//! - **Storage**: TOML configuration and a JSON state file used between CLI
//!   runs
//!
//! The two components share no data. Each keeps its collections behind its
//! own lock, so both can be shared across threads via `Arc`.
//!
//! ## Key Components
//!
//! - [`AvailabilityLedger`]: calendar system of record
//! - [`StreakTracker`]: check-in markers and streaks
//! - [`Config`]: application configuration management
//! - [`StateFile`]: persisted state between runs

pub mod availability;
pub mod error;
pub mod storage;
pub mod streak;
pub mod time;

pub use availability::{
    Appointment, AppointmentPatch, AppointmentStatus, AvailabilityLedger, BlockedTime,
    LedgerSnapshot, NewAppointment, NewBlockedTime, TimeSlot,
};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use storage::{AppState, AvailabilityConfig, Config, LoggingConfig, StateFile};
pub use streak::{StreakSnapshot, StreakSummary, StreakTracker};
pub use time::DayWindow;
