//! TOML-based application configuration.
//!
//! Stores:
//! - Working hours and slot granularity used for availability search
//! - The default reason attached to full-day blocks
//! - The log filter used by the CLI
//!
//! Configuration is stored at `~/.config/fitcoach/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Availability and slot search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// First bookable hour of the day (0-23)
    #[serde(default = "default_working_hour_start")]
    pub working_hour_start: u32,
    /// Hour at which the last slot must have ended (1-24)
    #[serde(default = "default_working_hour_end")]
    pub working_hour_end: u32,
    #[serde(default = "default_slot_interval")]
    pub slot_interval_minutes: u32,
    #[serde(default = "default_block_reason")]
    pub default_block_reason: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fitcoach/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_working_hour_start() -> u32 {
    9
}
fn default_working_hour_end() -> u32 {
    17
}
fn default_slot_interval() -> u32 {
    30
}
fn default_block_reason() -> String {
    "Not available".into()
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            working_hour_start: default_working_hour_start(),
            working_hour_end: default_working_hour_end(),
            slot_interval_minutes: default_slot_interval(),
            default_block_reason: default_block_reason(),
        }
    }
}

impl AvailabilityConfig {
    /// Length of the working day in minutes.
    pub fn working_minutes(&self) -> i64 {
        i64::from(self.working_hour_end.saturating_sub(self.working_hour_start)) * 60
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: e.to_string(),
            })
    }

    /// Load from the default location, or defaults when the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Load from the default location, reporting unreadable or invalid files.
    pub fn try_load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. The new configuration is validated
    /// before it replaces the current one; nothing is written to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.availability;
        if a.working_hour_end > 24 {
            return Err(ConfigError::InvalidValue {
                key: "availability.working_hour_end".into(),
                message: format!("must be at most 24, got {}", a.working_hour_end),
            });
        }
        if a.working_hour_start >= a.working_hour_end {
            return Err(ConfigError::InvalidValue {
                key: "availability.working_hour_start".into(),
                message: format!(
                    "must be before working_hour_end ({}), got {}",
                    a.working_hour_end, a.working_hour_start
                ),
            });
        }
        if a.slot_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "availability.slot_interval_minutes".into(),
                message: "must be positive".into(),
            });
        }
        Ok(())
    }
}
