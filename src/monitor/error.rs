//! Error types for the monitor layer.

use thiserror::Error;

/// Error type for kernel event listeners.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The event subscription could not be created.
    #[error("Failed to subscribe to link events: {0}")]
    Subscribe(#[source] std::io::Error),

    /// The kernel reported an error on the event socket.
    ///
    /// Non-fatal: the listener keeps delivering subsequent events.
    #[error("Netlink error: {message}")]
    Netlink {
        /// Error message from the netlink layer.
        message: String,
    },

    /// The event stream stopped unexpectedly.
    #[error("Listener stopped unexpectedly")]
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn stopped_displays_message() {
        assert_eq!(
            ListenerError::Stopped.to_string(),
            "Listener stopped unexpectedly"
        );
    }

    #[test]
    fn subscribe_preserves_source() {
        let error = ListenerError::Subscribe(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        ));

        assert!(error.to_string().contains("Failed to subscribe"));
        assert!(error.source().is_some());
    }

    #[test]
    fn netlink_displays_message() {
        let error = ListenerError::Netlink {
            message: "No buffer space available".to_string(),
        };
        assert!(error.to_string().contains("No buffer space"));
    }
}
