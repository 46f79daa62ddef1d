//! Check-in and streak commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use fitcoach_core::time::format_timestamp;
use fitcoach_core::Config;
use serde_json::json;

use super::{print_json, CliResult, Workspace};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Record today's check-in
    CheckIn {
        /// User ID
        user_id: String,
    },
    /// Current streak length
    Show {
        /// User ID
        user_id: String,
    },
    /// Most recent check-in day
    Last {
        /// User ID
        user_id: String,
    },
    /// Clear every check-in of the user
    Reset {
        /// User ID
        user_id: String,
    },
    /// Whether the user checked in today
    Today {
        /// User ID
        user_id: String,
    },
    /// Streak, total days and last check-in in one view
    Summary {
        /// User ID
        user_id: String,
    },
}

pub fn run(action: StreakAction, config: Config) -> CliResult {
    let ws = Workspace::open(config)?;

    match action {
        StreakAction::CheckIn { user_id } => {
            let date = ws.tracker.check_in(&user_id);
            ws.save()?;
            print_json(&json!({ "message": "Checked in", "date": format_timestamp(date) }))?;
        }
        StreakAction::Show { user_id } => {
            let streak = ws.tracker.get_streak(&user_id);
            print_json(&json!({ "userId": user_id, "streak": streak }))?;
        }
        StreakAction::Last { user_id } => {
            let last = ws.tracker.get_last_check_in(&user_id).map(format_timestamp);
            print_json(&json!({ "lastCheckIn": last }))?;
        }
        StreakAction::Reset { user_id } => {
            ws.tracker.reset_streak(&user_id);
            ws.save()?;
            print_json(&json!({ "message": "Streak reset" }))?;
        }
        StreakAction::Today { user_id } => {
            let checked_in = ws.tracker.has_checked_in_today(&user_id);
            print_json(&json!({ "checkedIn": checked_in }))?;
        }
        StreakAction::Summary { user_id } => {
            print_json(&ws.tracker.summary(&user_id, Utc::now().naive_utc()))?;
        }
    }
    Ok(())
}
