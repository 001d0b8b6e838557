//! Desktop notifications through `notify-send`.

use crate::process::{CommandRunner, TokioCommandRunner};

use super::{Notification, NotificationSink, NotifyError};

/// Program used to post desktop notifications.
const NOTIFY_SEND: &str = "notify-send";

/// [`NotificationSink`] that posts to the desktop via `notify-send`.
///
/// Runs `notify-send -a <app> -i <icon> <title> <body>` and waits for it to
/// exit. A non-zero exit is reported as [`NotifyError::Rejected`].
///
/// # Type Parameters
///
/// - `R`: The command runner (defaults to [`TokioCommandRunner`])
///
/// # Example
///
/// ```
/// use net_hook::notify::DesktopNotifier;
///
/// let notifier = DesktopNotifier::new("net-hook");
/// assert_eq!(notifier.app_name(), "net-hook");
/// ```
#[derive(Debug, Clone)]
pub struct DesktopNotifier<R = TokioCommandRunner> {
    runner: R,
    app_name: String,
}

impl DesktopNotifier<TokioCommandRunner> {
    /// Creates a notifier that spawns real processes.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_runner(TokioCommandRunner::new(), app_name)
    }
}

impl<R> DesktopNotifier<R> {
    /// Creates a notifier with a custom command runner.
    #[must_use]
    pub fn with_runner(runner: R, app_name: impl Into<String>) -> Self {
        Self {
            runner,
            app_name: app_name.into(),
        }
    }

    /// Application name shown by the notification daemon.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    fn args(&self, notification: &Notification) -> Vec<String> {
        vec![
            "-a".to_string(),
            self.app_name.clone(),
            "-i".to_string(),
            notification.icon.clone(),
            notification.title.clone(),
            notification.body.clone(),
        ]
    }
}

impl<R: CommandRunner> NotificationSink for DesktopNotifier<R> {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let output = self
            .runner
            .run(NOTIFY_SEND, &self.args(notification))
            .await?;

        if output.success {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                code: output.code,
                stderr: output.stderr,
            })
        }
    }
}
