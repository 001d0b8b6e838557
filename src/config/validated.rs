//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::monitor::ClassifyPolicy;
use crate::network::filter::{ExactNameFilter, FilterChain, NameRegexFilter, PrefixFilter};
use crate::notify::Icons;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Default-route policy for classification
    pub policy: ClassifyPolicy,

    /// Interface filter (loopback, prefixes, regex patterns)
    pub filter: FilterChain,

    /// Name prefixes excluded by the filter
    pub exclude_prefixes: Vec<String>,

    /// Application name passed to the notification daemon
    pub app_name: String,

    /// Notification icons
    pub icons: Icons,

    /// Single-instance lock file
    pub lock_file: PathBuf,

    /// Dry-run mode (log transitions without posting notifications)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ require_default_route: {}, system_wide_default_ok: {}, \
             exclude_prefixes: [{}], filters: {}, app_name: {}, lock_file: {}, dry_run: {} }}",
            self.policy.require_default_route,
            self.policy.system_wide_default_ok,
            self.exclude_prefixes.join(", "),
            self.filter.include_count() + self.filter.exclude_count(),
            self.app_name,
            self.lock_file.display(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - The application name, an icon or the lock file path is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let policy = Self::resolve_policy(cli, toml);
        let exclude_prefixes = Self::resolve_exclude_prefixes(cli, toml);
        let filter = Self::build_filter(cli, toml, &exclude_prefixes)?;
        let app_name = Self::resolve_app_name(cli, toml)?;
        let icons = Self::resolve_icons(cli, toml)?;
        let lock_file = Self::resolve_lock_file(cli, toml)?;

        Ok(Self {
            policy,
            filter,
            exclude_prefixes,
            app_name,
            icons,
            lock_file,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_home(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_policy(cli: &Cli, toml: Option<&TomlConfig>) -> ClassifyPolicy {
        // Enable flag: OR semantics
        let require_default_route = cli.require_default_route
            || toml.is_some_and(|t| t.monitor.require_default_route)
            || defaults::REQUIRE_DEFAULT_ROUTE;

        // Disable flag: CLI opt-out wins, then TOML, then default
        let system_wide_default_ok = !cli.no_system_wide_default
            && toml
                .and_then(|t| t.monitor.system_wide_default_ok)
                .unwrap_or(defaults::SYSTEM_WIDE_DEFAULT_OK);

        ClassifyPolicy::new(require_default_route, system_wide_default_ok)
    }

    fn resolve_exclude_prefixes(cli: &Cli, toml: Option<&TomlConfig>) -> Vec<String> {
        if !cli.exclude_prefixes.is_empty() {
            return cli.exclude_prefixes.clone();
        }

        toml.and_then(|t| t.filter.exclude_prefixes.clone())
            .unwrap_or_else(|| {
                defaults::EXCLUDE_PREFIXES
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            })
    }

    fn build_filter(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        exclude_prefixes: &[String],
    ) -> Result<FilterChain, ConfigError> {
        // Always exclude loopback
        let mut filter = FilterChain::new().exclude(ExactNameFilter::loopback());

        let prefixes = PrefixFilter::new(exclude_prefixes.iter().cloned());
        if !prefixes.is_empty() {
            filter = filter.exclude(prefixes);
        }

        // CLI patterns replace TOML patterns, includes and excludes independently
        let includes = if cli.include_interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.filter.include.as_slice())
        } else {
            cli.include_interfaces.as_slice()
        };

        for pattern in includes {
            filter = filter.include(compile(pattern)?);
        }

        let excludes = if cli.exclude_interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.filter.exclude.as_slice())
        } else {
            cli.exclude_interfaces.as_slice()
        };

        for pattern in excludes {
            filter = filter.exclude(compile(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_app_name(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let app_name = cli
            .app_name
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.app_name.as_deref()))
            .unwrap_or(defaults::APP_NAME);

        non_empty(field::APP_NAME, app_name)
    }

    fn resolve_icons(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Icons, ConfigError> {
        let connected = cli
            .icon_connected
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.icon_connected.as_deref()))
            .unwrap_or(defaults::ICON_CONNECTED);

        let disconnected = cli
            .icon_disconnected
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.icon_disconnected.as_deref()))
            .unwrap_or(defaults::ICON_DISCONNECTED);

        Ok(Icons {
            connected: non_empty(field::ICON_CONNECTED, connected)?,
            disconnected: non_empty(field::ICON_DISCONNECTED, disconnected)?,
        })
    }

    fn resolve_lock_file(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let path = cli
            .lock_file
            .clone()
            .or_else(|| toml.and_then(|t| t.lock.path.as_ref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(defaults::LOCK_FILE));

        if path.as_os_str().is_empty() {
            return Err(ConfigError::empty(field::LOCK_FILE));
        }

        Ok(expand_home(&path))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn compile(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

fn non_empty(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::empty(field));
    }
    Ok(value.to_string())
}

/// Replaces a leading `~` with the user's home directory.
///
/// Paths without a leading `~`, or with no resolvable home, are returned as-is.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
