//! Error types for library discovery and manifest scanning.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while locating libraries or reading manifests.
///
/// Most of these are recovered inside the scan and only surface in logs;
/// see [`crate::registry::scan_installed`] for which ones propagate.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The user's home directory could not be determined.
    #[error("could not determine the home directory")]
    HomeDirUnavailable,

    /// A manifest file could not be opened or read.
    #[error("failed to read manifest {path:?}: {source}")]
    ManifestRead { path: PathBuf, source: io::Error },

    /// The library index (`libraryfolders.vdf`) could not be read.
    #[error("failed to read library index {path:?}: {source}")]
    LibraryIndexRead { path: PathBuf, source: io::Error },

    /// A manifest directory exists but could not be listed.
    #[error("failed to list manifest directory {path:?}: {source}")]
    ManifestDirRead { path: PathBuf, source: io::Error },

    /// The manifest file-name pattern is not a valid glob.
    #[error("invalid manifest pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
