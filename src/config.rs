// SPDX-License-Identifier: GPL-3.0-only

//! Timing configuration for the keyboard engine and key repeat.
//!
//! The double-tap window and the repeat cadence are product-tuning values, so
//! they live here rather than inside the engine. Defaults come from
//! [`app_settings`](crate::app_settings). Configuration is read-only: it can be
//! parsed from JSON but is never written back.

use crate::app_settings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error occurred while reading the config file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
    },

    /// A value parsed correctly but is outside its allowed range
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: u64,
        /// Suggestion for fixing the value
        suggestion: String,
    },
}

impl ConfigError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
        }
    }

    fn zero_value(field: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value: 0,
            suggestion: format!("Set '{}' to a positive number of milliseconds", field),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading config '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ConfigError::JsonError {
                source,
                line_number,
            } => {
                write!(f, "Config parsing error")?;
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)
            }
            ConfigError::InvalidValue {
                field,
                value,
                suggestion,
            } => {
                write!(f, "Invalid value {} for '{}'", value, field)?;
                write!(f, "\n  Suggestion: {}", suggestion)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::JsonError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            source: err,
            file_path: None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        let line_number = Some(err.line()).filter(|line| *line > 0);
        Self::JsonError {
            source: err,
            line_number,
        }
    }
}

/// Raw config fields as they appear in JSON, before validation.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct KeyboardConfigFields {
    double_tap_window_ms: u64,
    repeat_initial_delay_ms: u64,
    repeat_interval_ms: u64,
}

impl Default for KeyboardConfigFields {
    fn default() -> Self {
        Self {
            double_tap_window_ms: app_settings::DEFAULT_DOUBLE_TAP_WINDOW_MS,
            repeat_initial_delay_ms: app_settings::DEFAULT_REPEAT_INITIAL_DELAY_MS,
            repeat_interval_ms: app_settings::DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}

impl TryFrom<KeyboardConfigFields> for KeyboardConfig {
    type Error = ConfigError;

    fn try_from(fields: KeyboardConfigFields) -> Result<Self, Self::Error> {
        KeyboardConfig::new(
            fields.double_tap_window_ms,
            fields.repeat_initial_delay_ms,
            fields.repeat_interval_ms,
        )
    }
}

/// Keyboard timing configuration.
///
/// Every value is a positive number of milliseconds. Fields are private so a
/// config can only come from [`KeyboardConfig::new`], [`Default`] or
/// deserialization, all of which validate. Missing JSON fields fall back to
/// their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyboardConfigFields")]
pub struct KeyboardConfig {
    /// Maximum gap between two Shift taps that still counts as a double tap.
    double_tap_window_ms: u64,
    /// How long Delete must be held before it starts repeating.
    repeat_initial_delay_ms: u64,
    /// Gap between repeated Delete events once repeating.
    repeat_interval_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: app_settings::DEFAULT_DOUBLE_TAP_WINDOW_MS,
            repeat_initial_delay_ms: app_settings::DEFAULT_REPEAT_INITIAL_DELAY_MS,
            repeat_interval_ms: app_settings::DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}

impl KeyboardConfig {
    /// Creates a config from millisecond values.
    ///
    /// Zero is rejected for every field: a zero window makes caps lock
    /// unreachable and a zero interval cannot drive a repeat timer.
    pub fn new(
        double_tap_window_ms: u64,
        repeat_initial_delay_ms: u64,
        repeat_interval_ms: u64,
    ) -> Result<Self, ConfigError> {
        if double_tap_window_ms == 0 {
            return Err(ConfigError::zero_value("double_tap_window_ms"));
        }
        if repeat_initial_delay_ms == 0 {
            return Err(ConfigError::zero_value("repeat_initial_delay_ms"));
        }
        if repeat_interval_ms == 0 {
            return Err(ConfigError::zero_value("repeat_interval_ms"));
        }
        Ok(Self {
            double_tap_window_ms,
            repeat_initial_delay_ms,
            repeat_interval_ms,
        })
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let fields: KeyboardConfigFields = serde_json::from_str(json)?;
        Self::try_from(fields)
    }

    /// Reads, parses and validates a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io_error_with_path(e, path.display().to_string()))?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!("Loaded keyboard config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Returns a copy with a different double-tap window.
    pub fn with_double_tap_window_ms(self, ms: u64) -> Result<Self, ConfigError> {
        Self::new(ms, self.repeat_initial_delay_ms, self.repeat_interval_ms)
    }

    /// Returns a copy with a different repeat cadence.
    pub fn with_repeat_ms(self, initial_delay_ms: u64, interval_ms: u64) -> Result<Self, ConfigError> {
        Self::new(self.double_tap_window_ms, initial_delay_ms, interval_ms)
    }

    /// Double-tap window as a [`Duration`].
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    /// Initial repeat delay as a [`Duration`].
    pub fn repeat_initial_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_initial_delay_ms)
    }

    /// Steady repeat interval as a [`Duration`].
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}
