//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Classification policy
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Interface filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Notification configuration
    #[serde(default)]
    pub notify: NotifySection,

    /// Single-instance lock configuration
    #[serde(default)]
    pub lock: LockSection,
}

/// Classification policy section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Require a default route through the interface itself
    #[serde(default)]
    pub require_default_route: bool,

    /// Accept a default route on any interface
    pub system_wide_default_ok: Option<bool>,
}

/// Interface filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Name prefixes to ignore (replaces the built-in list)
    pub exclude_prefixes: Option<Vec<String>>,

    /// Regex patterns for interfaces to monitor
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for interfaces to ignore
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Notification configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Application name passed to the notification daemon
    pub app_name: Option<String>,

    /// Icon for "connected"
    pub icon_connected: Option<String>,

    /// Icon for "disconnected"
    pub icon_disconnected: Option<String>,
}

/// Lock configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockSection {
    /// Lock file path (`~` is expanded)
    pub path: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# net-hook Configuration File

[monitor]
# Require a default route through the interface before reporting "Connected".
# Without one the interface is treated as still connecting (no notification).
require_default_route = false

# With require_default_route, a default route on any other interface
# is also accepted.
system_wide_default_ok = true

[filter]
# Interface name prefixes that are never monitored ("lo" is always ignored)
# Note: CLI --exclude-prefix values REPLACE this list entirely
exclude_prefixes = ["veth", "docker", "br-", "tap"]

# Regex patterns for interfaces to monitor (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^eth", "^wl"]

# Regex patterns for additional interfaces to ignore
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^virbr", "^tun"]

[notify]
# Application name shown by the notification daemon
# app_name = "net-hook"

# Icon names from the desktop icon theme
# icon_connected = "network-transmit-receive"
# icon_disconnected = "network-offline"

[lock]
# Single-instance lock file
# path = "/tmp/net-hook.lock"
"#
    .to_string()
}
