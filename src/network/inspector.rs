//! Link inspection trait and error types.

use std::future::Future;

use thiserror::Error;

use super::{InterfaceRecord, LinkSignals, OperState};

/// Error type for kernel state queries.
///
/// Describes what went wrong without dictating recovery strategy.
/// The monitor degrades every failed read to its "not ready" value.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The interface index no longer resolves (deleted mid-query).
    #[error("Interface index {index} not found")]
    NotFound {
        /// Kernel interface index that was queried.
        index: u32,
    },

    /// Reading a per-interface attribute failed.
    #[error("Failed to read {attribute} of '{name}': {source}")]
    Attribute {
        /// Interface name.
        name: String,
        /// Attribute that was read (e.g. `operstate`).
        attribute: &'static str,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A netlink request failed.
    #[error("Netlink error: {message}")]
    Netlink {
        /// Error message from the netlink layer.
        message: String,
    },
}

/// Trait for stateless queries against the live kernel network state.
///
/// # Design
///
/// - Pure reads, no caching; every call reflects the current kernel view
/// - Enables dependency injection for testing with mock implementations
/// - Errors are returned as-is; [`gather_signals`] folds them into
///   "not ready" values
pub trait LinkInspector: Send + Sync {
    /// Enumerates every interface currently known to the kernel.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError`] if the link dump fails.
    fn interfaces(
        &self,
    ) -> impl Future<Output = Result<Vec<InterfaceRecord>, InspectError>> + Send;

    /// Resolves an interface index to its current name.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::NotFound`] if the index no longer exists.
    fn resolve_name(&self, index: u32) -> impl Future<Output = Result<String, InspectError>> + Send;

    /// Reads the operational state attribute.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Attribute`] if the attribute cannot be read.
    fn oper_state(&self, name: &str) -> Result<OperState, InspectError>;

    /// Reads the carrier attribute.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Attribute`] if the attribute cannot be read.
    fn carrier(&self, name: &str) -> Result<bool, InspectError>;

    /// Returns whether `IFF_RUNNING` is set on the latest link record.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError`] if the link record cannot be fetched.
    fn running(&self, index: u32) -> impl Future<Output = Result<bool, InspectError>> + Send;

    /// Returns whether an IPv4 or IPv6 default route egresses via `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError`] if the route dump fails.
    fn has_default_route(
        &self,
        index: u32,
    ) -> impl Future<Output = Result<bool, InspectError>> + Send;

    /// Returns whether any default route exists in the routing table.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError`] if the route dump fails.
    fn has_any_default(&self) -> impl Future<Output = Result<bool, InspectError>> + Send;
}

/// Gathers the raw classification signals for one interface.
///
/// Each read that fails degrades to its "not ready" value and is logged at
/// debug level; a vanished interface is an expected race, not an error.
///
/// The system-wide route table is only scanned when `check_any_default`
/// is set and the interface is otherwise link-ready without its own
/// default route, since no other combination can change the outcome.
pub async fn gather_signals<I: LinkInspector>(
    inspector: &I,
    record: &InterfaceRecord,
    check_any_default: bool,
) -> LinkSignals {
    let name = record.name.as_str();

    let oper_state = inspector.oper_state(name).unwrap_or_else(|e| {
        tracing::info!("{name}: operstate unreadable ({e}), treating as unknown");
        OperState::Unknown
    });

    let carrier = inspector.carrier(name).unwrap_or_else(|e| {
        tracing::info!("{name}: carrier unreadable ({e}), treating as absent");
        false
    });

    let running = inspector.running(record.index).await.unwrap_or_else(|e| {
        tracing::info!("{name}: link flags unavailable ({e})");
        false
    });

    let has_default_route = inspector
        .has_default_route(record.index)
        .await
        .unwrap_or_else(|e| {
            tracing::info!("{name}: route query failed ({e})");
            false
        });

    let mut signals = LinkSignals {
        oper_state,
        carrier,
        running,
        has_default_route,
        has_any_default: false,
    };

    if check_any_default && signals.is_link_ready() && !has_default_route {
        signals.has_any_default = inspector.has_any_default().await.unwrap_or_else(|e| {
            tracing::info!("System route query failed ({e})");
            false
        });
    }

    signals
}
