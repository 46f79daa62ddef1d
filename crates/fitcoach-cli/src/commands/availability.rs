//! Blocked time and availability commands for CLI.

use clap::Subcommand;
use fitcoach_core::{Config, NewBlockedTime};
use serde_json::json;

use super::{print_json, CliResult, Workspace};

#[derive(Subcommand)]
pub enum AvailabilityAction {
    /// List blocked time, optionally only that starting on one day
    List {
        /// Date as ISO 8601 string
        #[arg(long)]
        date: Option<String>,
    },
    /// Block an arbitrary range
    Create {
        #[arg(long)]
        trainer: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        full_day: bool,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Remove a blocked range by ID
    Delete {
        /// Blocked time ID
        id: String,
    },
    /// Block a whole calendar day
    BlockDay {
        #[arg(long)]
        trainer: String,
        /// Date as ISO 8601 string
        date: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Remove full-day blocks for a calendar day
    UnblockDay {
        #[arg(long)]
        trainer: String,
        /// Date as ISO 8601 string
        date: String,
    },
    /// Whether a range is free of bookings and blocks
    Check {
        #[arg(long)]
        trainer: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Bookable slots on a day
    Slots {
        #[arg(long)]
        trainer: String,
        /// Date as ISO 8601 string
        date: String,
        /// Slot length in minutes
        #[arg(long, default_value_t = 60)]
        duration: i64,
    },
    /// Whether a day carries a full-day block
    DayBlocked {
        #[arg(long)]
        trainer: String,
        /// Date as ISO 8601 string
        date: String,
    },
}

pub fn run(action: AvailabilityAction, config: Config) -> CliResult {
    let ws = Workspace::open(config)?;

    match action {
        AvailabilityAction::List { date: None } => print_json(&ws.ledger.list_blocked_times())?,
        AvailabilityAction::List { date: Some(date) } => {
            print_json(&ws.ledger.list_blocked_times_by_date(&date)?)?
        }
        AvailabilityAction::Create {
            trainer,
            start,
            end,
            full_day,
            reason,
        } => {
            let request = NewBlockedTime {
                trainer_id: trainer,
                start_time: start,
                end_time: end,
                is_full_day: full_day,
                reason,
            };
            let blocked = ws.ledger.create_blocked_time(request)?;
            ws.save()?;
            print_json(&blocked)?;
        }
        AvailabilityAction::Delete { id } => {
            ws.ledger.delete_blocked_time(&id)?;
            ws.save()?;
            print_json(&json!({ "message": "Blocked time deleted", "id": id }))?;
        }
        AvailabilityAction::BlockDay {
            trainer,
            date,
            reason,
        } => {
            let blocked = ws
                .ledger
                .block_full_day(&trainer, &date, reason.as_deref())?;
            ws.save()?;
            print_json(&blocked)?;
        }
        AvailabilityAction::UnblockDay { trainer, date } => {
            let removed = ws.ledger.unblock_full_day(&trainer, &date)?;
            ws.save()?;
            print_json(&json!({ "message": "Full-day block removed", "removed": removed }))?;
        }
        AvailabilityAction::Check {
            trainer,
            start,
            end,
        } => {
            let available = ws.ledger.check_availability(&trainer, &start, &end)?;
            print_json(&json!({ "available": available }))?;
        }
        AvailabilityAction::Slots {
            trainer,
            date,
            duration,
        } => print_json(&ws.ledger.available_slots(&trainer, &date, duration)?)?,
        AvailabilityAction::DayBlocked { trainer, date } => {
            let blocked = ws.ledger.is_day_fully_blocked(&trainer, &date)?;
            print_json(&json!({ "fullyBlocked": blocked }))?;
        }
    }
    Ok(())
}
