//! Listener trait for kernel link notifications.
//!
//! This module provides the [`LinkListener`] trait that abstracts the
//! platform subscription delivering link add/remove events.

use super::{LinkEvent, ListenerError};
use tokio_stream::Stream;

/// Trait for platform-specific link change subscriptions.
///
/// # One-time Semantics
///
/// The `into_stream` method consumes `self`, enforcing one-time use.
///
/// # Stream Items
///
/// The stream yields `Result<LinkEvent, ListenerError>` strictly in kernel
/// delivery order:
/// - `Ok(event)` - A link was added, changed or removed
/// - `Err(ListenerError)` - A single receive failed; later items may still arrive
///
/// The stream ending (`None`) means the subscription is gone.
///
/// # Example
///
/// ```ignore
/// use net_hook::monitor::{LinkListener, ListenerError};
///
/// async fn handle_events<L: LinkListener>(listener: L) {
///     let mut stream = listener.into_stream();
///     while let Some(result) = stream.next().await {
///         match result {
///             Ok(event) => println!("link {} changed", event.index),
///             Err(e) => eprintln!("receive failed: {e}"),
///         }
///     }
/// }
/// ```
pub trait LinkListener: Send {
    /// The stream type returned by `into_stream`.
    type Stream: Stream<Item = Result<LinkEvent, ListenerError>> + Send + Unpin;

    /// Converts this listener into an event stream.
    fn into_stream(self) -> Self::Stream;
}
