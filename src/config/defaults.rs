//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

pub use crate::notify::{ICON_CONNECTED, ICON_DISCONNECTED};

/// Application name passed to the notification daemon.
pub const APP_NAME: &str = "net-hook";

/// Single-instance lock file.
pub const LOCK_FILE: &str = "/tmp/net-hook.lock";

/// Name prefixes of virtual interfaces that are never monitored.
pub const EXCLUDE_PREFIXES: &[&str] = &["veth", "docker", "br-", "tap"];

/// Require a default route through the interface itself.
pub const REQUIRE_DEFAULT_ROUTE: bool = false;

/// Accept a default route on any interface as "internet ready".
pub const SYSTEM_WIDE_DEFAULT_OK: bool = true;

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "net-hook.toml";
