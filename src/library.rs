//! Steam library folder discovery.
//!
//! The primary install lives at `~/.local/share/Steam`. Additional library
//! folders (other drives, SD cards) are listed in
//! `steamapps/libraryfolders.vdf`:
//!
//! ```text
//! "libraryfolders"
//! {
//!     "0"
//!     {
//!         "path"      "/home/deck/.local/share/Steam"
//!         ...
//!     }
//!     "1"
//!     {
//!         "path"      "/run/media/mmcblk0p1"
//!     }
//! }
//! ```
//!
//! Every `"path"` line is taken regardless of nesting depth.

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use crate::LibraryRoot;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PATH_KEY: &str = "\"path\"";

/// Resolves the library roots to scan, primary root first.
///
/// A missing primary root or index is not an error. An unreadable index is
/// logged and contributes no extra roots.
pub fn find_library_roots(config: &ScanConfig) -> Vec<LibraryRoot> {
    let mut roots: Vec<LibraryRoot> = Vec::new();

    let primary = config.steam_root();
    if primary.exists() {
        roots.push(LibraryRoot::new(primary));
    } else {
        debug!(path = %primary.display(), "Primary Steam directory not found");
    }

    let index_path = config.index_path();
    if index_path.exists() {
        match read_library_index(&index_path) {
            Ok(paths) => {
                for path in paths {
                    if !roots.iter().any(|r| r.path.as_os_str() == path.as_os_str()) {
                        roots.push(LibraryRoot::new(path));
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse libraryfolders.vdf");
            }
        }
    }

    let paths: Vec<_> = roots.iter().map(|r| r.path.display().to_string()).collect();
    info!(roots = ?paths, "Found Steam library paths");

    roots
}

/// Reads the library index and returns the existing library paths it lists.
pub fn read_library_index(path: &Path) -> ScanResult<Vec<PathBuf>> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::LibraryIndexRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_library_paths(&content)
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect())
}

/// Extracts every `"path"` value from index text, in file order, without
/// duplicates. Lines with a missing or unterminated value are logged and
/// skipped.
pub fn parse_library_paths(content: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with(PATH_KEY) {
            continue;
        }

        let rest = &line[PATH_KEY.len()..];
        let Some(path) = rest
            .find('"')
            .map(|open| &rest[open + 1..])
            .and_then(|value| value.find('"').map(|close| &value[..close]))
        else {
            warn!(line = %line, "Skipping malformed library path entry");
            continue;
        };

        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }

    paths
}
