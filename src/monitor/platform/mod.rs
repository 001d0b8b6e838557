//! Platform-specific link event listener implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`LinkListener`](super::LinkListener) trait.
//!
//! # Platform Support
//!
//! - **Linux**: Subscribes to the `RTMGRP_LINK` rtnetlink multicast group.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::{NetlinkEventStream, NetlinkListener};

// Re-export platform-specific listener as PlatformListener for convenience
#[cfg(target_os = "linux")]
pub use linux::NetlinkListener as PlatformListener;
