//! JSON state file shared by CLI invocations.
//!
//! Holds the ledger and streak snapshots in one document:
//!
//! ```json
//! { "appointments": [], "blockedTimes": [], "checkIns": { "u1": ["2024-05-01"] } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, AvailabilityConfig};
use crate::availability::{AvailabilityLedger, LedgerSnapshot};
use crate::error::{Result, StorageError};
use crate::streak::{StreakSnapshot, StreakTracker};

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(flatten)]
    pub ledger: LedgerSnapshot,
    #[serde(flatten)]
    pub streaks: StreakSnapshot,
}

impl AppState {
    pub fn capture(ledger: &AvailabilityLedger, tracker: &StreakTracker) -> Self {
        Self {
            ledger: ledger.snapshot(),
            streaks: tracker.snapshot(),
        }
    }

    /// Rebuild live components from the stored state.
    pub fn restore(self, config: AvailabilityConfig) -> (AvailabilityLedger, StreakTracker) {
        (
            AvailabilityLedger::from_snapshot(config, self.ledger),
            StreakTracker::from_snapshot(self.streaks),
        )
    }
}

/// Location of the state document on disk.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `state.json` inside the data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join("state.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state. A missing file is an empty state.
    pub fn load(&self) -> Result<AppState> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet");
                return Ok(AppState::default());
            }
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Write the state through a temporary sibling file and rename it over
    /// the target.
    pub fn save(&self, state: &AppState) -> Result<()> {
        let write_failed = |message: String| StorageError::WriteFailed {
            path: self.path.clone(),
            message,
        };

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| write_failed(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| write_failed(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::NewAppointment;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("state.json"));
        assert_eq!(file.load().unwrap(), AppState::default());
    }

    #[test]
    fn test_save_and_reload_components() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("state.json"));

        let ledger = AvailabilityLedger::new();
        let tracker = StreakTracker::new();
        ledger
            .create_appointment(NewAppointment::new(
                "t1",
                "c1",
                "Intro",
                "2024-06-20T10:00:00",
                "2024-06-20T11:00:00",
            ))
            .unwrap();
        ledger.block_full_day("t1", "2024-06-21", None).unwrap();
        tracker.check_in_on("c1", chrono::NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());

        file.save(&AppState::capture(&ledger, &tracker)).unwrap();
        let (ledger2, tracker2) = file.load().unwrap().restore(AvailabilityConfig::default());

        assert_eq!(ledger2.snapshot(), ledger.snapshot());
        assert_eq!(tracker2.get_streak("c1"), 1);
    }

    #[test]
    fn test_document_shape() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        assert!(json.get("appointments").is_some());
        assert!(json.get("blockedTimes").is_some());
        assert!(json.get("checkIns").is_some());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = StateFile::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Storage(StorageError::Corrupt { .. })
        ));
    }
}
