//! Notification payload and sink trait.

use std::future::Future;

use crate::monitor::CoarseState;

use super::NotifyError;

/// Default icon for a connected interface.
pub const ICON_CONNECTED: &str = "network-transmit-receive";

/// Default icon for a disconnected interface.
pub const ICON_DISCONNECTED: &str = "network-offline";

/// Icon classes used for connect and disconnect notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icons {
    /// Icon for "connected".
    pub connected: String,
    /// Icon for "disconnected".
    pub disconnected: String,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            connected: ICON_CONNECTED.to_string(),
            disconnected: ICON_DISCONNECTED.to_string(),
        }
    }
}

/// A single user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Summary line, e.g. `eth0 Connected`.
    pub title: String,
    /// Body text (the interface name).
    pub body: String,
    /// Icon class understood by the desktop sink.
    pub icon: String,
}

impl Notification {
    /// Creates a notification from its parts.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: icon.into(),
        }
    }

    /// "`<name>` Connected".
    #[must_use]
    pub fn connected(name: &str, icons: &Icons) -> Self {
        Self::new(format!("{name} Connected"), name, &icons.connected)
    }

    /// "`<name>` Disconnected".
    #[must_use]
    pub fn disconnected(name: &str, icons: &Icons) -> Self {
        Self::new(format!("{name} Disconnected"), name, &icons.disconnected)
    }

    /// Builds the notification for a transition into `state`.
    ///
    /// Returns `None` for [`CoarseState::Intermediate`], which is never
    /// announced.
    #[must_use]
    pub fn for_state(name: &str, state: CoarseState, icons: &Icons) -> Option<Self> {
        match state {
            CoarseState::Connected => Some(Self::connected(name, icons)),
            CoarseState::Disconnected => Some(Self::disconnected(name, icons)),
            CoarseState::Intermediate => None,
        }
    }
}

/// Trait for delivering notifications to the user.
///
/// Implementations should not retry; delivery is best-effort and the caller
/// logs and discards any error.
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if delivery failed.
    fn notify(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Sink that only logs, used for `--dry-run`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            "Dry-run: would notify '{}' ({})",
            notification.title,
            notification.icon
        );
        Ok(())
    }
}
