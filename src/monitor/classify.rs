//! State classification from raw link signals.

use crate::network::LinkSignals;

use super::CoarseState;

/// Default-route policy applied when deciding internet readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyPolicy {
    /// Require a default route through the interface itself.
    pub require_default_route: bool,
    /// A default route on any interface also counts.
    pub system_wide_default_ok: bool,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            require_default_route: false,
            system_wide_default_ok: true,
        }
    }
}

impl ClassifyPolicy {
    /// Creates a policy from the two flags.
    #[must_use]
    pub const fn new(require_default_route: bool, system_wide_default_ok: bool) -> Self {
        Self {
            require_default_route,
            system_wide_default_ok,
        }
    }

    /// Whether the system-wide route table can influence the outcome.
    ///
    /// Without `require_default_route` a link-ready interface is internet
    /// ready regardless of routes, so the scan would be wasted.
    #[must_use]
    pub const fn needs_system_routes(&self) -> bool {
        self.system_wide_default_ok && self.require_default_route
    }

    /// Link-ready plus the configured default-route requirement.
    #[must_use]
    pub const fn is_internet_ready(&self, signals: &LinkSignals) -> bool {
        signals.is_link_ready()
            && (signals.has_default_route
                || (self.system_wide_default_ok && signals.has_any_default)
                || !self.require_default_route)
    }
}

/// Classifies raw signals into a [`CoarseState`].
///
/// A hard-down signal (no carrier, or a down operational state) wins over
/// everything else, so stale flag data during a race can never produce
/// [`CoarseState::Connected`].
#[must_use]
pub const fn classify(signals: &LinkSignals, policy: &ClassifyPolicy) -> CoarseState {
    if !signals.carrier || signals.oper_state.is_hard_down() {
        return CoarseState::Disconnected;
    }

    if policy.is_internet_ready(signals) {
        CoarseState::Connected
    } else {
        CoarseState::Intermediate
    }
}
