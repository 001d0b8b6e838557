//! Linux link inspection using rtnetlink and sysfs.

use std::pin::pin;

use futures::TryStreamExt;
use netlink_packet_route::link::{LinkAttribute, LinkFlag, LinkMessage};
use netlink_packet_route::route::{RouteAttribute, RouteMessage};
use rtnetlink::{Handle, IpVersion};

use super::SysfsReader;
use crate::network::{InspectError, InterfaceRecord, LinkInspector, OperState};

/// Linux implementation of [`LinkInspector`].
///
/// Link records and routing tables are queried over an rtnetlink request
/// socket; `operstate` and `carrier` come from sysfs. Nothing is cached.
///
/// # Example
///
/// ```no_run
/// use net_hook::network::{LinkInspector, platform::NetlinkInspector};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let inspector = NetlinkInspector::connect()?;
/// for link in inspector.interfaces().await? {
///     println!("{}: {}", link.index, link.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NetlinkInspector {
    handle: Handle,
    sysfs: SysfsReader,
}

impl NetlinkInspector {
    /// Opens a netlink request socket and spawns its connection task.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Netlink`] if the socket cannot be opened.
    pub fn connect() -> Result<Self, InspectError> {
        let (connection, handle, _) = rtnetlink::new_connection().map_err(|e| {
            InspectError::Netlink {
                message: e.to_string(),
            }
        })?;
        tokio::spawn(connection);

        Ok(Self {
            handle,
            sysfs: SysfsReader::default(),
        })
    }

    /// Fetches the most recent link record for `index`.
    async fn link(&self, index: u32) -> Result<LinkMessage, InspectError> {
        let mut links = pin!(self.handle.link().get().match_index(index).execute());
        links
            .try_next()
            .await
            .map_err(netlink_error)?
            .ok_or(InspectError::NotFound { index })
    }

    /// Scans the IPv4 and IPv6 tables for a default route, optionally
    /// restricted to routes egressing via `oif`.
    async fn default_route(&self, oif: Option<u32>) -> Result<bool, InspectError> {
        for version in [IpVersion::V4, IpVersion::V6] {
            let mut routes = pin!(self.handle.route().get(version).execute());
            while let Some(route) = routes.try_next().await.map_err(netlink_error)? {
                if is_default_via(&route, oif) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl LinkInspector for NetlinkInspector {
    async fn interfaces(&self) -> Result<Vec<InterfaceRecord>, InspectError> {
        let mut links = pin!(self.handle.link().get().execute());
        let mut records = Vec::new();
        while let Some(link) = links.try_next().await.map_err(netlink_error)? {
            if let Some(name) = link_name(&link) {
                records.push(InterfaceRecord::new(link.header.index, name));
            }
        }
        Ok(records)
    }

    async fn resolve_name(&self, index: u32) -> Result<String, InspectError> {
        let link = self.link(index).await?;
        link_name(&link).ok_or(InspectError::NotFound { index })
    }

    fn oper_state(&self, name: &str) -> Result<OperState, InspectError> {
        self.sysfs.oper_state(name)
    }

    fn carrier(&self, name: &str) -> Result<bool, InspectError> {
        self.sysfs.carrier(name)
    }

    async fn running(&self, index: u32) -> Result<bool, InspectError> {
        let link = self.link(index).await?;
        Ok(link.header.flags.contains(&LinkFlag::Running))
    }

    async fn has_default_route(&self, index: u32) -> Result<bool, InspectError> {
        self.default_route(Some(index)).await
    }

    async fn has_any_default(&self) -> Result<bool, InspectError> {
        self.default_route(None).await
    }
}

/// Extracts `IFLA_IFNAME` from a link record.
pub(crate) fn link_name(link: &LinkMessage) -> Option<String> {
    link.attributes.iter().find_map(|attr| match attr {
        LinkAttribute::IfName(name) => Some(name.clone()),
        _ => None,
    })
}

/// A zero-length destination prefix is a default route.
fn is_default_via(route: &RouteMessage, oif: Option<u32>) -> bool {
    if route.header.destination_prefix_length != 0 {
        return false;
    }

    oif.is_none_or(|wanted| {
        route
            .attributes
            .iter()
            .any(|attr| matches!(attr, RouteAttribute::Oif(i) if *i == wanted))
    })
}

fn netlink_error(e: rtnetlink::Error) -> InspectError {
    InspectError::Netlink {
        message: e.to_string(),
    }
}
