//! Last observed coarse state per interface name.

use std::collections::HashMap;

use super::CoarseState;

/// Mapping from interface name to the last recorded [`CoarseState`].
///
/// Owned by the single event-processing loop; no locking is needed.
/// Entries are never removed: a stale entry for a deleted interface is only
/// ever used for comparison when a same-named interface reappears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionCache {
    entries: HashMap<String, CoarseState>,
}

impl TransitionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last recorded state for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CoarseState> {
        self.entries.get(name).copied()
    }

    /// Records `state` for `name`, returning the previous value.
    pub fn record(&mut self, name: &str, state: CoarseState) -> Option<CoarseState> {
        self.entries.insert(name.to_string(), state)
    }

    /// Number of interfaces with a recorded state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
