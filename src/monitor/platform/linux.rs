//! Linux link change listener using the rtnetlink multicast group.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use netlink_packet_core::{NetlinkMessage, NetlinkPayload};
use netlink_packet_route::RouteNetlinkMessage;
use netlink_packet_route::link::{LinkFlag, LinkMessage};
use netlink_sys::{AsyncSocket, SocketAddr};
use rtnetlink::Handle;
use tokio_stream::Stream;

use crate::monitor::event::{IFF_LOWER_UP, IFF_RUNNING, IFF_UP};
use crate::monitor::{LinkEvent, LinkEventKind, LinkListener, ListenerError};

/// Multicast group carrying `RTM_NEWLINK` / `RTM_DELLINK`.
const RTMGRP_LINK: u32 = 1;

/// Linux implementation of [`LinkListener`].
///
/// Binds an rtnetlink socket to the link multicast group. The socket is
/// driven by a dedicated connection task that pushes every unsolicited
/// message into an unbounded channel; the stream pulls from that channel
/// in delivery order.
///
/// # Example
///
/// ```no_run
/// use net_hook::monitor::LinkListener;
/// use net_hook::monitor::platform::NetlinkListener;
/// use tokio_stream::StreamExt;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut stream = NetlinkListener::new()?.into_stream();
///
/// while let Some(result) = stream.next().await {
///     match result {
///         Ok(event) => println!("link {} {:?}", event.index, event.kind),
///         Err(e) => eprintln!("Listener error: {e}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct NetlinkListener {
    handle: Handle,
    messages: UnboundedReceiver<(NetlinkMessage<RouteNetlinkMessage>, SocketAddr)>,
}

impl std::fmt::Debug for NetlinkListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlinkListener").finish_non_exhaustive()
    }
}

impl NetlinkListener {
    /// Opens the subscription and spawns its connection task.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Subscribe`] if the socket cannot be opened
    /// or bound to the multicast group.
    pub fn new() -> Result<Self, ListenerError> {
        let (mut connection, handle, messages) =
            rtnetlink::new_connection().map_err(ListenerError::Subscribe)?;

        let addr = SocketAddr::new(0, RTMGRP_LINK);
        connection
            .socket_mut()
            .socket_mut()
            .bind(&addr)
            .map_err(ListenerError::Subscribe)?;

        tokio::spawn(connection);

        Ok(Self { handle, messages })
    }
}

impl LinkListener for NetlinkListener {
    type Stream = NetlinkEventStream;

    fn into_stream(self) -> Self::Stream {
        NetlinkEventStream {
            _handle: self.handle,
            messages: self.messages,
        }
    }
}

/// Stream of decoded link events.
pub struct NetlinkEventStream {
    /// Keeps the request side of the connection open for the stream's lifetime.
    _handle: Handle,
    messages: UnboundedReceiver<(NetlinkMessage<RouteNetlinkMessage>, SocketAddr)>,
}

impl std::fmt::Debug for NetlinkEventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlinkEventStream").finish_non_exhaustive()
    }
}

impl Stream for NetlinkEventStream {
    type Item = Result<LinkEvent, ListenerError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.messages.poll_next_unpin(cx) {
                Poll::Ready(Some((message, _))) => {
                    if let Some(item) = decode(message) {
                        return Poll::Ready(Some(item));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Turns a raw netlink message into a link event.
///
/// Returns `None` for message types the monitor does not care about.
fn decode(message: NetlinkMessage<RouteNetlinkMessage>) -> Option<Result<LinkEvent, ListenerError>> {
    match message.payload {
        NetlinkPayload::InnerMessage(RouteNetlinkMessage::NewLink(link)) => {
            Some(Ok(to_event(LinkEventKind::Added, &link)))
        }
        NetlinkPayload::InnerMessage(RouteNetlinkMessage::DelLink(link)) => {
            Some(Ok(to_event(LinkEventKind::Removed, &link)))
        }
        NetlinkPayload::Error(err) => Some(Err(ListenerError::Netlink {
            message: format!("{err:?}"),
        })),
        NetlinkPayload::Overrun(_) => Some(Err(ListenerError::Netlink {
            message: "receive buffer overrun, events were lost".to_string(),
        })),
        _ => None,
    }
}

fn to_event(kind: LinkEventKind, link: &LinkMessage) -> LinkEvent {
    LinkEvent::new(kind, link.header.index, flag_bits(&link.header.flags))
}

fn flag_bits(flags: &[LinkFlag]) -> u32 {
    flags.iter().fold(0, |bits, flag| {
        bits | match flag {
            LinkFlag::Up => IFF_UP,
            LinkFlag::Running => IFF_RUNNING,
            LinkFlag::LowerUp => IFF_LOWER_UP,
            _ => 0,
        }
    })
}
