//! Trainer calendar: appointments, blocked time and availability queries.

mod appointment;
mod blocked;
mod ledger;
mod slots;

pub use appointment::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
pub use blocked::{BlockedTime, NewBlockedTime};
pub use ledger::{AvailabilityLedger, LedgerSnapshot};
pub use slots::{BusyRange, BusyRanges, SlotFinder, TimeSlot};
