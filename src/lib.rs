//! net-hook: per-interface connectivity notifier
//!
//! A library for tracking the link state of physical network interfaces
//! through kernel netlink events and announcing genuine connect and
//! disconnect transitions as desktop notifications.

pub mod config;
#[cfg(unix)]
pub mod lock;
pub mod monitor;
pub mod network;
pub mod notify;
pub mod process;
