//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid regex pattern for interface filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A value that must not be empty was empty.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `InvalidValue` errors.
pub mod field {
    /// The notification application name.
    pub const APP_NAME: &str = "app_name";
    /// The "connected" icon.
    pub const ICON_CONNECTED: &str = "icon_connected";
    /// The "disconnected" icon.
    pub const ICON_DISCONNECTED: &str = "icon_disconnected";
    /// The lock file path.
    pub const LOCK_FILE: &str = "lock_file";
}

impl ConfigError {
    /// Creates an `InvalidValue` error for an empty field.
    #[must_use]
    pub fn empty(field: &'static str) -> Self {
        Self::InvalidValue {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}
