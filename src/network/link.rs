//! Core types for raw link state.

use std::fmt;
use std::str::FromStr;

/// Operational state of an interface as exposed by the kernel (RFC 2863).
///
/// Parsed from the textual `operstate` attribute. Anything that cannot be
/// read or recognised is [`OperState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperState {
    /// Interface is operational.
    Up,
    /// Interface is administratively or operationally down.
    Down,
    /// A lower layer the interface depends on is down.
    LowerLayerDown,
    /// A hardware component is missing.
    NotPresent,
    /// Interface is in test mode.
    Testing,
    /// Interface is waiting for an external event (e.g. 802.1X).
    Dormant,
    /// State could not be determined.
    #[default]
    Unknown,
}

impl OperState {
    /// Returns true for the states that mean the link is definitely gone.
    #[must_use]
    pub const fn is_hard_down(self) -> bool {
        matches!(self, Self::Down | Self::LowerLayerDown | Self::NotPresent)
    }

    /// Parses a raw attribute value, degrading to [`OperState::Unknown`].
    #[must_use]
    pub fn from_attribute(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for OperState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "lowerlayerdown" => Ok(Self::LowerLayerDown),
            "notpresent" => Ok(Self::NotPresent),
            "testing" => Ok(Self::Testing),
            "dormant" => Ok(Self::Dormant),
            "unknown" => Ok(Self::Unknown),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::LowerLayerDown => "lower-layer-down",
            Self::NotPresent => "not-present",
            Self::Testing => "testing",
            Self::Dormant => "dormant",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// An interface as enumerated from the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Kernel-assigned index, stable while the interface exists.
    pub index: u32,
    /// Interface name (e.g. `eth0`). May be reused after deletion.
    pub name: String,
}

impl InterfaceRecord {
    /// Creates a new interface record.
    #[must_use]
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Raw signals gathered for one interface at one point in time.
///
/// Every field already holds its "not ready" value if the underlying read
/// failed; consumers never see read errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)] // kernel flags are naturally boolean
pub struct LinkSignals {
    /// Operational state attribute.
    pub oper_state: OperState,
    /// Carrier present.
    pub carrier: bool,
    /// `IFF_RUNNING` set in the latest link record.
    pub running: bool,
    /// A default route egresses through this interface (IPv4 or IPv6).
    pub has_default_route: bool,
    /// A default route exists anywhere in the routing table.
    pub has_any_default: bool,
}

impl LinkSignals {
    /// Signals of a fully ready interface with its own default route.
    #[cfg(test)]
    #[must_use]
    pub const fn ready() -> Self {
        Self {
            oper_state: OperState::Up,
            carrier: true,
            running: true,
            has_default_route: true,
            has_any_default: true,
        }
    }

    /// Signals of an interface that has lost its link.
    #[cfg(test)]
    #[must_use]
    pub const fn down() -> Self {
        Self {
            oper_state: OperState::Down,
            carrier: false,
            running: false,
            has_default_route: false,
            has_any_default: false,
        }
    }

    /// Operational state up, carrier present and running flag set.
    #[must_use]
    pub const fn is_link_ready(&self) -> bool {
        matches!(self.oper_state, OperState::Up) && self.carrier && self.running
    }

    /// True only for a genuine link loss: no carrier and a hard-down state.
    ///
    /// Drivers emit short down/up flaps while re-associating; those keep
    /// carrier and must not be reported as disconnects.
    #[must_use]
    pub const fn is_real_disconnect(&self) -> bool {
        !self.carrier && self.oper_state.is_hard_down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod oper_state {
        use super::*;

        #[test]
        fn parses_kernel_values() {
            assert_eq!(OperState::from_attribute("up\n"), OperState::Up);
            assert_eq!(OperState::from_attribute("down"), OperState::Down);
            assert_eq!(
                OperState::from_attribute("lowerlayerdown"),
                OperState::LowerLayerDown
            );
            assert_eq!(
                OperState::from_attribute("notpresent"),
                OperState::NotPresent
            );
            assert_eq!(OperState::from_attribute("dormant"), OperState::Dormant);
        }

        #[test]
        fn unrecognised_value_is_unknown() {
            assert_eq!(OperState::from_attribute(""), OperState::Unknown);
            assert_eq!(OperState::from_attribute("UP"), OperState::Unknown);
        }

        #[test]
        fn hard_down_set() {
            assert!(OperState::Down.is_hard_down());
            assert!(OperState::LowerLayerDown.is_hard_down());
            assert!(OperState::NotPresent.is_hard_down());
            assert!(!OperState::Up.is_hard_down());
            assert!(!OperState::Unknown.is_hard_down());
            assert!(!OperState::Dormant.is_hard_down());
        }

        #[test]
        fn display_uses_dashed_names() {
            assert_eq!(OperState::LowerLayerDown.to_string(), "lower-layer-down");
            assert_eq!(OperState::NotPresent.to_string(), "not-present");
        }
    }

    mod link_signals {
        use super::*;

        #[test]
        fn default_is_not_ready() {
            let signals = LinkSignals::default();
            assert!(!signals.is_link_ready());
            assert_eq!(signals.oper_state, OperState::Unknown);
        }

        #[test]
        fn link_ready_requires_all_three() {
            assert!(LinkSignals::ready().is_link_ready());

            let no_running = LinkSignals {
                running: false,
                ..LinkSignals::ready()
            };
            assert!(!no_running.is_link_ready());

            let no_carrier = LinkSignals {
                carrier: false,
                ..LinkSignals::ready()
            };
            assert!(!no_carrier.is_link_ready());
        }

        #[test]
        fn real_disconnect_needs_no_carrier_and_hard_down() {
            assert!(LinkSignals::down().is_real_disconnect());

            let flap = LinkSignals {
                carrier: true,
                ..LinkSignals::down()
            };
            assert!(!flap.is_real_disconnect());

            let unknown = LinkSignals {
                oper_state: OperState::Unknown,
                ..LinkSignals::down()
            };
            assert!(!unknown.is_real_disconnect());
        }
    }
}
