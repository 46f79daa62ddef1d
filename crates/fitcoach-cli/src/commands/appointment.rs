//! Appointment commands for CLI.

use clap::Subcommand;
use fitcoach_core::{AppointmentPatch, AppointmentStatus, Config, NewAppointment};
use serde_json::json;

use super::{print_json, CliResult, Workspace};

#[derive(Subcommand)]
pub enum AppointmentAction {
    /// List all appointments
    List,
    /// Appointments where the user is trainer or client
    ForUser {
        /// User ID
        user_id: String,
    },
    /// Appointments starting on a calendar day
    ByDate {
        /// Date as ISO 8601 string
        date: String,
    },
    /// Book a new appointment
    Create {
        #[arg(long)]
        trainer: String,
        #[arg(long)]
        client: String,
        #[arg(long)]
        title: String,
        /// Start as ISO 8601 string
        #[arg(long)]
        start: String,
        /// End as ISO 8601 string
        #[arg(long)]
        end: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change selected fields of an appointment
    Update {
        /// Appointment ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// scheduled, completed or cancelled
        #[arg(long)]
        status: Option<AppointmentStatus>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark an appointment as cancelled
    Cancel {
        /// Appointment ID
        id: String,
    },
    /// Remove an appointment
    Delete {
        /// Appointment ID
        id: String,
    },
}

pub fn run(action: AppointmentAction, config: Config) -> CliResult {
    let ws = Workspace::open(config)?;

    match action {
        AppointmentAction::List => print_json(&ws.ledger.list_appointments())?,
        AppointmentAction::ForUser { user_id } => {
            print_json(&ws.ledger.list_appointments_for_user(&user_id))?
        }
        AppointmentAction::ByDate { date } => {
            print_json(&ws.ledger.list_appointments_by_date(&date)?)?
        }
        AppointmentAction::Create {
            trainer,
            client,
            title,
            start,
            end,
            description,
            location,
            notes,
        } => {
            let request = NewAppointment {
                trainer_id: trainer,
                client_id: client,
                title,
                description,
                start_time: start,
                end_time: end,
                location,
                notes,
            };
            let appointment = ws.ledger.create_appointment(request)?;
            ws.save()?;
            print_json(&appointment)?;
        }
        AppointmentAction::Update {
            id,
            title,
            description,
            start,
            end,
            status,
            location,
            notes,
        } => {
            let patch = AppointmentPatch {
                title,
                description,
                start_time: start,
                end_time: end,
                status,
                location,
                notes,
            };
            let appointment = ws.ledger.update_appointment(&id, &patch)?;
            ws.save()?;
            print_json(&appointment)?;
        }
        AppointmentAction::Cancel { id } => {
            ws.ledger.cancel_appointment(&id)?;
            ws.save()?;
            print_json(&json!({ "message": "Appointment cancelled", "id": id }))?;
        }
        AppointmentAction::Delete { id } => {
            ws.ledger.delete_appointment(&id)?;
            ws.save()?;
            print_json(&json!({ "message": "Appointment deleted", "id": id }))?;
        }
    }
    Ok(())
}
