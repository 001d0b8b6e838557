//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use net_hook::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0) - stopped by a shutdown signal.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// The single-instance lock could not be acquired (exit code 1).
    pub const LOCK_FAILED: ExitCode = ExitCode::FAILURE;

    /// Configuration error (exit code 2) - invalid args, unreadable config file, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn config_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Runtime error (exit code 3) - netlink failure, event stream ended, etc.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'net-hook init' to generate a configuration template.");
        }
        ConfigError::InvalidRegex { .. } => {
            eprintln!("\nInterface patterns use Rust regex syntax, e.g. '^wl' or '^eth\\d+$'.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
