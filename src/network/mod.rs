//! Network layer for inspecting kernel link state.
//!
//! This module provides types and traits for:
//! - Representing raw link signals ([`LinkSignals`], [`OperState`])
//! - Describing interfaces by index and name ([`InterfaceRecord`])
//! - Querying the live kernel state ([`LinkInspector`])
//! - Excluding loopback and virtual interfaces ([`filter`])
//! - Platform-specific implementations ([`platform`])

pub mod filter;
mod inspector;
mod link;
pub mod platform;


pub use inspector::{InspectError, LinkInspector};
pub use link::{InterfaceRecord, LinkSignals, OperState};

pub use inspector::gather_signals;

#[cfg(test)]
pub use inspector::mock;
