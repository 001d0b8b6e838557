//! Platform-specific link inspector implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`LinkInspector`](super::LinkInspector) trait.
//!
//! # Platform Support
//!
//! - **Linux**: Link records and routes via rtnetlink, attributes via sysfs.

mod sysfs;

#[cfg(target_os = "linux")]
mod linux;

pub use sysfs::SysfsReader;

#[cfg(target_os = "linux")]
pub use linux::NetlinkInspector;

// Re-export platform-specific inspector as PlatformInspector for convenience
#[cfg(target_os = "linux")]
pub use linux::NetlinkInspector as PlatformInspector;
