//! Application execution logic.
//!
//! This module wires the kernel inspector, the link event subscription and
//! the notification sink into a [`ConnectivityMonitor`] and drives it until
//! a shutdown signal arrives.

use thiserror::Error;
use tokio::signal;

use net_hook::config::ValidatedConfig;
use net_hook::monitor::{ConnectivityMonitor, ListenerError};
use net_hook::network::{InspectError, LinkInspector};
use net_hook::notify::NotificationSink;

#[cfg(target_os = "linux")]
use net_hook::lock::{InstanceLock, LockError};
#[cfg(target_os = "linux")]
use net_hook::monitor::LinkListener;
#[cfg(target_os = "linux")]
use net_hook::monitor::platform::PlatformListener;
#[cfg(target_os = "linux")]
use net_hook::network::platform::PlatformInspector;
#[cfg(target_os = "linux")]
use net_hook::notify::{DesktopNotifier, LogNotifier};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Single-instance lock could not be taken.
    #[cfg(target_os = "linux")]
    #[error(transparent)]
    Lock(#[from] LockError),

    /// Failed to open the kernel query socket.
    #[error("Failed to connect to kernel link state: {0}")]
    Inspector(#[source] InspectError),

    /// Failed to subscribe to link events.
    #[error("Failed to create link listener: {0}")]
    Listener(#[source] ListenerError),

    /// Unexpected stream termination.
    #[error("Link event stream terminated unexpectedly")]
    StreamTerminated,

    /// No link event source exists for this platform.
    #[cfg(not(target_os = "linux"))]
    #[error("Link monitoring is only supported on Linux")]
    Unsupported,
}

impl RunError {
    /// Returns true if the single-instance lock could not be taken,
    /// whether it is held elsewhere or the lock file is unusable.
    #[must_use]
    pub const fn is_lock_failure(&self) -> bool {
        #[cfg(target_os = "linux")]
        if let Self::Lock(_) = self {
            return true;
        }
        false
    }
}

impl From<ListenerError> for RunError {
    fn from(error: ListenerError) -> Self {
        match error {
            ListenerError::Stopped => Self::StreamTerminated,
            other => Self::Listener(other),
        }
    }
}

/// Executes the main application loop.
///
/// This function:
/// 1. Acquires the single-instance lock
/// 2. Opens the kernel query socket
/// 3. Subscribes to link events
/// 4. Seeds the transition cache from the current state (no notifications)
/// 5. Processes events until shutdown signal (Ctrl+C / SIGTERM)
///
/// The lock is released when this function returns.
///
/// # Errors
///
/// Returns an error if:
/// - Another instance is running
/// - The netlink sockets cannot be opened
/// - The event stream terminates unexpectedly
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Real netlink sockets
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
#[cfg(target_os = "linux")]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let lock = InstanceLock::acquire(&config.lock_file)?;
    tracing::debug!("Holding instance lock {}", lock.path().display());

    let inspector = PlatformInspector::connect().map_err(RunError::Inspector)?;

    // Subscribe before the snapshot so no transition falls in between
    let listener = PlatformListener::new().map_err(RunError::Listener)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - notifications will be logged but not shown");
        let mut monitor = build_monitor(inspector, LogNotifier, config);
        seed(&mut monitor).await;
        monitor
            .run(listener.into_stream(), shutdown_signal())
            .await?;
    } else {
        let sink = DesktopNotifier::new(config.app_name.clone());
        let mut monitor = build_monitor(inspector, sink, config);
        seed(&mut monitor).await;
        monitor
            .run(listener.into_stream(), shutdown_signal())
            .await?;
    }

    Ok(())
}

/// Non-Linux stub.
#[cfg(not(tarpaulin_include))]
#[cfg(not(target_os = "linux"))]
#[allow(clippy::unused_async)]
pub async fn execute(_config: ValidatedConfig) -> Result<(), RunError> {
    Err(RunError::Unsupported)
}

/// Creates the monitor from configuration.
fn build_monitor<I, S>(inspector: I, sink: S, config: ValidatedConfig) -> ConnectivityMonitor<I, S>
where
    I: LinkInspector,
    S: NotificationSink,
{
    ConnectivityMonitor::new(inspector, sink, config.filter)
        .with_policy(config.policy)
        .with_icons(config.icons)
}

/// Seeds the transition cache.
///
/// A failed enumeration is not fatal: the cache starts empty and every
/// interface is learned from its first event.
async fn seed<I, S>(monitor: &mut ConnectivityMonitor<I, S>) -> usize
where
    I: LinkInspector,
    S: NotificationSink,
{
    match monitor.bootstrap().await {
        Ok(count) => {
            tracing::info!("Tracking {count} interface(s)");
            count
        }
        Err(e) => {
            tracing::warn!("Initial interface scan failed, starting with empty state: {e}");
            0
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
