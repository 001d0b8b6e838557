//! Kernel link change events.

/// `IFF_UP`: interface administratively up.
pub const IFF_UP: u32 = 0x1;
/// `IFF_RUNNING`: interface operationally running.
pub const IFF_RUNNING: u32 = 0x40;
/// `IFF_LOWER_UP`: driver signals L1 up.
pub const IFF_LOWER_UP: u32 = 0x1_0000;

/// Whether the kernel announced a new/changed link or a deleted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkEventKind {
    /// `RTM_NEWLINK`: link added or any of its attributes changed.
    Added,
    /// `RTM_DELLINK`: link removed.
    Removed,
}

/// A single link notification as delivered by the kernel.
///
/// Carries only the index and flag bitmask; the interface name is resolved
/// against the live kernel state when the event is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEvent {
    /// Add or delete notification.
    pub kind: LinkEventKind,
    /// Kernel interface index.
    pub index: u32,
    /// Raw `IFF_*` flags from the message header.
    pub flags: u32,
}

impl LinkEvent {
    /// Creates a new link event.
    #[must_use]
    pub const fn new(kind: LinkEventKind, index: u32, flags: u32) -> Self {
        Self { kind, index, flags }
    }

    /// Creates an "added" event with no flags.
    #[must_use]
    pub const fn added(index: u32) -> Self {
        Self::new(LinkEventKind::Added, index, 0)
    }

    /// Creates a "removed" event with no flags.
    #[must_use]
    pub const fn removed(index: u32) -> Self {
        Self::new(LinkEventKind::Removed, index, 0)
    }

    /// Returns true if the event's flags carry `IFF_RUNNING`.
    ///
    /// Only logged; classification re-reads the latest link record.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.flags & IFF_RUNNING != 0
    }

    /// Returns true if this is a link-delete notification.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self.kind, LinkEventKind::Removed)
    }
}
