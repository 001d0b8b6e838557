//! Interface filtering for selective monitoring.
//!
//! This module provides traits and types for filtering network interfaces
//! by name before they reach the classifier.
//!
//! # Design
//!
//! - **Pure Matchers**: [`ExactNameFilter`], [`PrefixFilter`] and
//!   [`NameRegexFilter`] only answer "does this name match?" without
//!   include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers with correct semantics:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)

use regex::Regex;

/// Trait for matching network interfaces by name.
///
/// # Thread Safety
///
/// Filters must be `Send + Sync` so the monitor can be moved into a task.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface name matches this filter.
    fn matches(&self, name: &str) -> bool;
}

// ============================================================================
// ExactNameFilter - Pure matcher by exact name
// ============================================================================

/// Matches a single interface name exactly (e.g. `lo`).
///
/// # Examples
///
/// ```
/// use net_hook::network::filter::{ExactNameFilter, InterfaceFilter};
///
/// let filter = ExactNameFilter::new("lo");
///
/// assert!(filter.matches("lo"));
/// assert!(!filter.matches("lo0"));
/// ```
#[derive(Debug, Clone)]
pub struct ExactNameFilter {
    name: String,
}

impl ExactNameFilter {
    /// Creates a filter matching exactly `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The loopback interface.
    #[must_use]
    pub fn loopback() -> Self {
        Self::new("lo")
    }
}

impl InterfaceFilter for ExactNameFilter {
    fn matches(&self, name: &str) -> bool {
        self.name == name
    }
}

// ============================================================================
// PrefixFilter - Pure matcher by name prefix
// ============================================================================

/// Matches interface names starting with any of a set of prefixes.
///
/// Used for virtual interfaces whose names are generated (`veth1a2b`,
/// `docker0`, `br-3f2e...`, `tap0`).
///
/// # Examples
///
/// ```
/// use net_hook::network::filter::{PrefixFilter, InterfaceFilter};
///
/// let filter = PrefixFilter::new(["veth", "docker"]);
///
/// assert!(filter.matches("veth9c1d"));
/// assert!(filter.matches("docker0"));
/// assert!(!filter.matches("eth0"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrefixFilter {
    prefixes: Vec<String>,
}

impl PrefixFilter {
    /// Creates a prefix filter; an empty prefix list matches nothing.
    #[must_use]
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Returns the configured prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns true if no prefixes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl InterfaceFilter for PrefixFilter {
    fn matches(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

// ============================================================================
// NameRegexFilter - Pure matcher by name pattern
// ============================================================================

/// Matches interface names against a regex pattern.
///
/// # Examples
///
/// ```
/// use net_hook::network::filter::{NameRegexFilter, InterfaceFilter};
///
/// let filter = NameRegexFilter::new(r"^wg\d+$").unwrap();
///
/// assert!(filter.matches("wg0"));
/// assert!(!filter.matches("wlan0"));
/// ```
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

// ============================================================================
// FilterChain - Include OR / Exclude AND semantics
// ============================================================================

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject.
/// 2. **Include filters (OR)**: Any match → accept. Empty includes = match all.
///
/// # Examples
///
/// ```
/// use net_hook::network::filter::{ExactNameFilter, FilterChain, InterfaceFilter, PrefixFilter};
///
/// let chain = FilterChain::new()
///     .exclude(ExactNameFilter::loopback())
///     .exclude(PrefixFilter::new(["veth", "docker", "br-", "tap"]));
///
/// assert!(chain.matches("eth0"));
/// assert!(!chain.matches("lo"));
/// assert!(!chain.matches("br-abcdef"));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn InterfaceFilter>>,
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all interfaces).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter (rejects on any match).
    #[must_use]
    pub fn exclude<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, name: &str) -> bool {
        if self.excludes.iter().any(|f| f.matches(name)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(name))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

// Blanket implementation: any &T where T: InterfaceFilter also implements InterfaceFilter
impl<T: InterfaceFilter + ?Sized> InterfaceFilter for &T {
    fn matches(&self, name: &str) -> bool {
        (*self).matches(name)
    }
}

impl InterfaceFilter for Box<dyn InterfaceFilter> {
    fn matches(&self, name: &str) -> bool {
        self.as_ref().matches(name)
    }
}
