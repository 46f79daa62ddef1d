mod config;
mod snapshot;

pub use config::{AvailabilityConfig, Config, LoggingConfig};
pub use snapshot::{AppState, StateFile};

use std::path::PathBuf;

/// Returns `~/.config/fitcoach[-dev]/` based on FITCOACH_ENV.
///
/// Set FITCOACH_ENV=dev to use the development data directory, or
/// FITCOACH_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FITCOACH_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FITCOACH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("fitcoach-dev")
            } else {
                base_dir.join("fitcoach")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
