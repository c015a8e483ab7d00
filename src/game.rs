use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A fully installed game, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledGame {
    pub name: String,
    pub appid: String,
}

/// A Steam library folder whose `steamapps` directory holds app manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryRoot {
    pub path: PathBuf,
}

impl LibraryRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory containing this library's manifests (e.g. `<root>/steamapps`).
    pub fn manifest_dir(&self, subdir: &str) -> PathBuf {
        self.path.join(subdir)
    }
}

impl AsRef<Path> for LibraryRoot {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Fields extracted from a single `appmanifest_*.acf` file.
///
/// Every field is optional because manifests are written by Steam while it runs
/// and may be partial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestRecord {
    pub appid: Option<String>,
    pub name: Option<String>,
    /// `Some(true)` only when `StateFlags` is exactly `"4"`.
    pub installed: Option<bool>,
}

impl ManifestRecord {
    /// Promotes the record to an [`InstalledGame`] if it describes a complete,
    /// fully installed app. Anything else yields `None`.
    pub fn into_installed(self) -> Option<InstalledGame> {
        if self.installed != Some(true) {
            return None;
        }
        match (self.appid, self.name) {
            (Some(appid), Some(name)) if !appid.is_empty() && !name.is_empty() => {
                Some(InstalledGame { name, appid })
            }
            _ => None,
        }
    }
}
