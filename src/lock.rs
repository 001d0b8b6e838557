//! Single-instance guard.
//!
//! Two daemons watching the same links would announce every transition
//! twice. [`InstanceLock`] takes an exclusive advisory lock on a well-known
//! file for the lifetime of the process; the kernel drops it when the
//! holder exits, so a crashed instance never leaves a stale lock behind.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use thiserror::Error;

/// Error type for acquiring the instance lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("Another instance is already running (lock held on '{}')", path.display())]
    AlreadyHeld {
        /// Lock file path.
        path: PathBuf,
    },

    /// The lock file could not be created or opened.
    #[error("Failed to open lock file '{}': {source}", path.display())]
    Open {
        /// Lock file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The lock call itself failed for a reason other than contention.
    #[error("Failed to lock '{}': {errno}", path.display())]
    Lock {
        /// Lock file path.
        path: PathBuf,
        /// Error reported by `flock(2)`.
        errno: Errno,
    },
}

/// An exclusive, non-blocking `flock(2)` held for as long as this value lives.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    _guard: Flock<File>,
}

impl InstanceLock {
    /// Acquires the lock, creating the file and its parent directory if needed.
    ///
    /// Never blocks: if another process holds the lock this fails immediately.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::AlreadyHeld`] if another instance is running,
    /// or [`LockError::Open`] / [`LockError::Lock`] on I/O failure.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, LockError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| LockError::Open {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let file = open_lock_file(&path).map_err(|source| LockError::Open {
            path: path.clone(),
            source,
        })?;

        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(guard) => {
                tracing::debug!("Acquired instance lock: {}", path.display());
                Ok(Self {
                    path,
                    _guard: guard,
                })
            }
            Err((_, Errno::EWOULDBLOCK)) => Err(LockError::AlreadyHeld { path }),
            Err((_, errno)) => Err(LockError::Lock { path, errno }),
        }
    }

    /// Returns the lock file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Opens the lock file, creating it if missing.
///
/// `flock(2)` does not need write access, so a file left behind by another
/// user is opened read-only rather than rejected.
fn open_lock_file(path: &Path) -> std::io::Result<File> {
    match OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
    {
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => File::open(path),
        other => other,
    }
}
