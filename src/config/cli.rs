//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// net-hook: per-interface connectivity notifier
///
/// Watches kernel link events and posts a desktop notification whenever a
/// physical interface genuinely connects or disconnects.
#[derive(Debug, Parser)]
#[command(name = "net-hook")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Require a default route through the interface to count as connected
    #[arg(long = "require-default-route")]
    pub require_default_route: bool,

    /// Do not accept a default route on another interface as sufficient
    #[arg(long = "no-system-wide-default")]
    pub no_system_wide_default: bool,

    /// Interface name prefix to ignore (can be specified multiple times)
    #[arg(long = "exclude-prefix", value_name = "PREFIX")]
    pub exclude_prefixes: Vec<String>,

    /// Regex pattern for interfaces to monitor (can be specified multiple times)
    #[arg(long = "include-interface", value_name = "PATTERN")]
    pub include_interfaces: Vec<String>,

    /// Regex pattern for interfaces to ignore (can be specified multiple times)
    #[arg(long = "exclude-interface", value_name = "PATTERN")]
    pub exclude_interfaces: Vec<String>,

    /// Path of the single-instance lock file
    #[arg(long = "lock-file")]
    pub lock_file: Option<PathBuf>,

    /// Application name shown by the notification daemon
    #[arg(long = "app-name")]
    pub app_name: Option<String>,

    /// Icon for "connected" notifications
    #[arg(long = "icon-connected")]
    pub icon_connected: Option<String>,

    /// Icon for "disconnected" notifications
    #[arg(long = "icon-disconnected")]
    pub icon_disconnected: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Test mode - log transitions without posting notifications
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for net-hook
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
