//! Notification layer for user-visible connect/disconnect messages.
//!
//! This module provides types and traits for:
//! - Formatting notifications ([`Notification`], [`Icons`])
//! - Abstracting the delivery sink ([`NotificationSink`])
//! - Desktop delivery via `notify-send` ([`DesktopNotifier`])
//! - Log-only delivery for dry runs ([`LogNotifier`])
//!
//! Delivery is best-effort: callers log a [`NotifyError`] and move on.

mod desktop;
mod error;
mod sink;

pub use desktop::DesktopNotifier;
pub use error::NotifyError;
pub use sink::{
    ICON_CONNECTED, ICON_DISCONNECTED, Icons, LogNotifier, Notification, NotificationSink,
};

#[cfg(test)]
pub use sink::mock;
