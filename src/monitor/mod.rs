//! Monitor layer for tracking per-interface connectivity.
//!
//! This module provides types and functions for:
//! - Coarse connectivity states ([`CoarseState`])
//! - Classifying raw link signals ([`classify`], [`ClassifyPolicy`])
//! - Remembering the last recorded state ([`TransitionCache`])
//! - Kernel link events ([`LinkEvent`], [`LinkListener`], [`platform`])
//! - The event loop and transition policy ([`ConnectivityMonitor`], [`Decision`])

mod cache;
mod classify;
mod connectivity;
mod error;
pub mod event;
mod listener;
pub mod platform;
mod state;

pub use cache::TransitionCache;
pub use classify::{ClassifyPolicy, classify};
pub use connectivity::{ConnectivityMonitor, Decision};
pub use error::ListenerError;
pub use event::{LinkEvent, LinkEventKind};
pub use listener::LinkListener;
pub use state::CoarseState;
