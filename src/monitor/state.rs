//! Coarse connectivity state.

use std::fmt;

/// The only externally visible classification of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoarseState {
    /// Link is up and satisfies the configured default-route policy.
    Connected,
    /// Link has no carrier or is in a hard-down operational state.
    Disconnected,
    /// Anything in between (negotiating, no route yet, unknown state).
    Intermediate,
}

impl CoarseState {
    /// Returns the lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for CoarseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
