//! Error types for notification delivery.

use thiserror::Error;

use crate::process::ProcessError;

/// Error type for notification delivery.
///
/// Never escalated: the monitor logs it and continues.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification tool could not be started.
    #[error("Failed to launch notifier: {0}")]
    Launch(#[from] ProcessError),

    /// The notification tool ran but reported failure.
    #[error("Notifier exited with {}: {stderr}", describe_exit(.code))]
    Rejected {
        /// Exit code, if the tool exited normally.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
}

#[allow(clippy::ref_option)] // thiserror passes fields by reference
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}
