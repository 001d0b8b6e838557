//! Per-interface connectivity tracking and the event loop.
//!
//! [`ConnectivityMonitor`] owns the only mutable state in the process (the
//! [`TransitionCache`]) and processes kernel events strictly one at a time:
//! resolve name → gather signals → classify → decide → notify → record.

use std::future::Future;

use tokio_stream::{Stream, StreamExt};

use crate::network::filter::{FilterChain, InterfaceFilter};
use crate::network::{InspectError, InterfaceRecord, LinkInspector, LinkSignals, gather_signals};
use crate::notify::{Icons, Notification, NotificationSink};

use super::{ClassifyPolicy, CoarseState, LinkEvent, ListenerError, TransitionCache, classify};

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;

/// Outcome of the transition policy for one processed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Same state as cached; nothing happens.
    Unchanged,
    /// Became connected; notify and record.
    Connected,
    /// Genuine link loss; notify and record.
    Disconnected,
    /// Classified disconnected but carrier or state says it is a flap;
    /// no notification and the cached value is kept.
    FakeDisconnect,
    /// Intermediate state; recorded silently.
    Intermediate,
}

impl Decision {
    /// Applies the transition policy.
    ///
    /// `previous` is `None` when the interface has never been recorded; any
    /// state then counts as a change.
    #[must_use]
    pub fn decide(
        previous: Option<CoarseState>,
        current: CoarseState,
        real_disconnect: bool,
    ) -> Self {
        if previous == Some(current) {
            return Self::Unchanged;
        }

        match current {
            CoarseState::Connected => Self::Connected,
            CoarseState::Disconnected if real_disconnect => Self::Disconnected,
            CoarseState::Disconnected => Self::FakeDisconnect,
            CoarseState::Intermediate => Self::Intermediate,
        }
    }

    /// State to announce, if any.
    #[must_use]
    pub const fn announced(self) -> Option<CoarseState> {
        match self {
            Self::Connected => Some(CoarseState::Connected),
            Self::Disconnected => Some(CoarseState::Disconnected),
            Self::Unchanged | Self::FakeDisconnect | Self::Intermediate => None,
        }
    }

    /// State to write into the cache, if any.
    #[must_use]
    pub const fn recorded(self) -> Option<CoarseState> {
        match self {
            Self::Connected => Some(CoarseState::Connected),
            Self::Disconnected => Some(CoarseState::Disconnected),
            Self::Intermediate => Some(CoarseState::Intermediate),
            Self::Unchanged | Self::FakeDisconnect => None,
        }
    }
}

/// Tracks the coarse state of every monitored interface and notifies on
/// meaningful transitions.
///
/// # Type Parameters
///
/// - `I`: The kernel state inspector
/// - `S`: The notification sink
/// - `F`: The interface filter (defaults to [`FilterChain`])
///
/// # Example
///
/// ```ignore
/// let mut monitor = ConnectivityMonitor::new(inspector, sink, filter)
///     .with_policy(ClassifyPolicy::new(true, false));
/// monitor.bootstrap().await?;
/// monitor.run(listener.into_stream(), shutdown_signal()).await?;
/// ```
#[derive(Debug)]
pub struct ConnectivityMonitor<I, S, F = FilterChain> {
    inspector: I,
    sink: S,
    filter: F,
    policy: ClassifyPolicy,
    icons: Icons,
    cache: TransitionCache,
}

impl<I, S, F> ConnectivityMonitor<I, S, F>
where
    I: LinkInspector,
    S: NotificationSink,
    F: InterfaceFilter,
{
    /// Creates a monitor with the default policy, default icons and an
    /// empty cache.
    #[must_use]
    pub fn new(inspector: I, sink: S, filter: F) -> Self {
        Self {
            inspector,
            sink,
            filter,
            policy: ClassifyPolicy::default(),
            icons: Icons::default(),
            cache: TransitionCache::new(),
        }
    }

    /// Sets the default-route policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ClassifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the notification icons.
    #[must_use]
    pub fn with_icons(mut self, icons: Icons) -> Self {
        self.icons = icons;
        self
    }

    /// Returns the transition cache.
    #[must_use]
    pub const fn cache(&self) -> &TransitionCache {
        &self.cache
    }

    /// Returns the notification sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the inspector.
    #[must_use]
    pub const fn inspector(&self) -> &I {
        &self.inspector
    }

    /// Returns true if `name` is monitored (not loopback or virtual).
    #[must_use]
    pub fn is_monitored(&self, name: &str) -> bool {
        self.filter.matches(name)
    }

    /// Gathers live signals for `record` and classifies them.
    pub async fn classify(&self, record: &InterfaceRecord) -> (CoarseState, LinkSignals) {
        let signals =
            gather_signals(&self.inspector, record, self.policy.needs_system_routes()).await;
        (classify(&signals, &self.policy), signals)
    }

    /// Seeds the cache with the current state of every monitored interface.
    ///
    /// Fires no notifications. Returns the number of interfaces recorded.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError`] if the interface list cannot be enumerated.
    pub async fn bootstrap(&mut self) -> Result<usize, InspectError> {
        let links: Vec<InterfaceRecord> = self
            .inspector
            .interfaces()
            .await?
            .into_iter()
            .filter(|l| self.filter.matches(&l.name))
            .collect();

        for record in &links {
            let (state, _) = self.classify(record).await;
            self.cache.record(&record.name, state);
            tracing::info!("INIT {}: state={state}", record.name);
        }

        Ok(links.len())
    }

    /// Processes one kernel event to completion.
    ///
    /// Returns `None` if the event was dropped: the index no longer
    /// resolves, or the interface is excluded.
    pub async fn handle_event(&mut self, event: LinkEvent) -> Option<Decision> {
        let name = match self.inspector.resolve_name(event.index).await {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!("Dropping event for index {}: {e}", event.index);
                return None;
            }
        };

        if !self.filter.matches(&name) {
            return None;
        }

        tracing::debug!(
            "{name}: {} flags={:#x} running={}",
            if event.is_removed() { "DELLINK" } else { "NEWLINK" },
            event.flags,
            event.is_running()
        );

        let record = InterfaceRecord::new(event.index, name);
        let (current, signals) = self.classify(&record).await;
        let previous = self.cache.get(&record.name);
        let decision = Decision::decide(previous, current, signals.is_real_disconnect());

        self.apply(&record.name, previous, current, decision).await;
        Some(decision)
    }

    /// Consumes events in delivery order until `shutdown` completes.
    ///
    /// Receive errors are logged and skipped; one bad event never stops
    /// the loop.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Stopped`] if the event stream ends.
    pub async fn run<St, Sd>(&mut self, mut events: St, shutdown: Sd) -> Result<(), ListenerError>
    where
        St: Stream<Item = Result<LinkEvent, ListenerError>> + Unpin,
        Sd: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!("Listening for link events...");

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping...");
                    return Ok(());
                }

                item = events.next() => match item {
                    Some(Ok(event)) => {
                        self.handle_event(event).await;
                    }
                    Some(Err(e)) => {
                        tracing::error!("Link event error: {e}");
                    }
                    None => return Err(ListenerError::Stopped),
                }
            }
        }
    }

    async fn apply(
        &mut self,
        name: &str,
        previous: Option<CoarseState>,
        current: CoarseState,
        decision: Decision,
    ) {
        let prev = previous.map_or("none", CoarseState::as_str);
        tracing::debug!("EVENT {name}: current={current}, prev={prev}");

        match decision {
            Decision::Unchanged => tracing::info!("{name}: state unchanged, skip notify"),
            Decision::FakeDisconnect => {
                tracing::info!("{name}: fake disconnect ignored (cache stays {prev})");
            }
            Decision::Intermediate => tracing::info!("{name}: intermediate (no notify)"),
            Decision::Connected | Decision::Disconnected => {}
        }

        if let Some(state) = decision.announced() {
            self.dispatch(name, state).await;
        }

        if let Some(state) = decision.recorded() {
            self.cache.record(name, state);
        }
    }

    async fn dispatch(&self, name: &str, state: CoarseState) {
        let Some(notification) = Notification::for_state(name, state, &self.icons) else {
            return;
        };

        tracing::info!("NOTIFY: {} | {}", notification.title, notification.body);
        if let Err(e) = self.sink.notify(&notification).await {
            tracing::warn!("Notification for {name} failed: {e}");
        }
    }
}
