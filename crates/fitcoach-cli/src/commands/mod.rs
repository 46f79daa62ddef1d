pub mod appointment;
pub mod availability;
pub mod config;
pub mod streak;

use fitcoach_core::{AppState, AvailabilityLedger, Config, StateFile, StreakTracker};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Live components restored from the state file for one invocation.
pub struct Workspace {
    file: StateFile,
    pub ledger: AvailabilityLedger,
    pub tracker: StreakTracker,
}

impl Workspace {
    pub fn open(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let file = StateFile::open_default()?;
        let (ledger, tracker) = file.load()?.restore(config.availability);
        tracing::debug!(path = %file.path().display(), "state loaded");
        Ok(Self {
            file,
            ledger,
            tracker,
        })
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.file
            .save(&AppState::capture(&self.ledger, &self.tracker))?;
        Ok(())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
