//! Configuration layer for net-hook.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! No field is required; running with no arguments monitors every
//! non-virtual interface with the default policy.
//!
//! For list options (`exclude_prefixes`, `include`, `exclude`), CLI values
//! **replace** TOML values entirely (not merged). Each list is replaced
//! independently.
//!
//! # Boolean Flag Semantics
//!
//! `--require-default-route` uses OR semantics: if set `true` in either CLI
//! or TOML, the result is `true`. `--no-system-wide-default` is the
//! opposite: passing it forces `system_wide_default_ok` off regardless of
//! the file.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
