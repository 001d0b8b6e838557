//! Per-interface attribute reads from `/sys/class/net`.

use std::path::PathBuf;

use crate::network::{InspectError, OperState};

/// Default mount point of the network class in sysfs.
const SYSFS_NET: &str = "/sys/class/net";

/// Reads the `operstate` and `carrier` attributes of an interface.
///
/// The root is configurable so tests can point it at a temporary tree.
#[derive(Debug, Clone)]
pub struct SysfsReader {
    root: PathBuf,
}

impl Default for SysfsReader {
    fn default() -> Self {
        Self::new(SYSFS_NET)
    }
}

impl SysfsReader {
    /// Creates a reader rooted at `root` (normally `/sys/class/net`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reads the operational state of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Attribute`] if the file cannot be read.
    pub fn oper_state(&self, name: &str) -> Result<OperState, InspectError> {
        self.read(name, "operstate")
            .map(|raw| OperState::from_attribute(&raw))
    }

    /// Reads the carrier flag of `name`.
    ///
    /// The kernel refuses to read `carrier` on an administratively down
    /// interface (`EINVAL`); that surfaces here as an error.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Attribute`] if the file cannot be read.
    pub fn carrier(&self, name: &str) -> Result<bool, InspectError> {
        self.read(name, "carrier").map(|raw| raw.trim() == "1")
    }

    fn read(&self, name: &str, attribute: &'static str) -> Result<String, InspectError> {
        let path = self.root.join(name).join(attribute);
        std::fs::read_to_string(&path).map_err(|source| InspectError::Attribute {
            name: name.to_string(),
            attribute,
            source,
        })
    }
}
