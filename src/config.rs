//! Scan configuration.
//!
//! The defaults describe a native Linux Steam install. Hosts that know better
//! (a Flatpak sandbox, a test fixture) inject their own root with
//! [`ScanConfig::with_steam_root`].

use crate::error::{ScanError, ScanResult};
use std::path::{Path, PathBuf};

/// Steam's data directory relative to the home directory.
pub const DEFAULT_STEAM_DIR: &str = ".local/share/Steam";

/// Directory under every library root that holds the app manifests.
pub const DEFAULT_MANIFEST_DIR: &str = "steamapps";

/// File-name pattern of per-app manifests.
pub const DEFAULT_MANIFEST_PATTERN: &str = "appmanifest_*.acf";

/// Library index listing additional library folders.
pub const DEFAULT_INDEX_FILE: &str = "libraryfolders.vdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Primary Steam installation, also the home of the library index.
    pub steam_root: PathBuf,
    pub manifest_dir: String,
    pub manifest_pattern: String,
    pub index_file: String,
}

impl ScanConfig {
    /// Configuration rooted at `~/.local/share/Steam`.
    pub fn from_home() -> ScanResult<Self> {
        let home = dirs::home_dir().ok_or(ScanError::HomeDirUnavailable)?;
        Ok(Self::with_steam_root(home.join(DEFAULT_STEAM_DIR)))
    }

    /// Configuration rooted at an explicit Steam directory.
    pub fn with_steam_root(steam_root: impl Into<PathBuf>) -> Self {
        Self {
            steam_root: steam_root.into(),
            manifest_dir: DEFAULT_MANIFEST_DIR.to_string(),
            manifest_pattern: DEFAULT_MANIFEST_PATTERN.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }

    pub fn with_manifest_dir(mut self, dir: impl Into<String>) -> Self {
        self.manifest_dir = dir.into();
        self
    }

    pub fn with_manifest_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.manifest_pattern = pattern.into();
        self
    }

    /// Path of the library index, e.g. `<steam_root>/steamapps/libraryfolders.vdf`.
    pub fn index_path(&self) -> PathBuf {
        self.steam_root.join(&self.manifest_dir).join(&self.index_file)
    }

    /// Compiles the manifest file-name pattern.
    pub fn compiled_pattern(&self) -> ScanResult<glob::Pattern> {
        glob::Pattern::new(&self.manifest_pattern).map_err(|e| ScanError::InvalidPattern {
            pattern: self.manifest_pattern.clone(),
            reason: e.msg.to_string(),
        })
    }

    pub fn steam_root(&self) -> &Path {
        &self.steam_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_path_under_manifest_dir() {
        let config = ScanConfig::with_steam_root("/home/deck/.local/share/Steam");
        assert_eq!(
            config.index_path(),
            PathBuf::from("/home/deck/.local/share/Steam/steamapps/libraryfolders.vdf")
        );
    }

    #[test]
    fn test_default_pattern_matches_manifests_only() {
        let pattern = ScanConfig::with_steam_root("/tmp").compiled_pattern().unwrap();
        assert!(pattern.matches("appmanifest_570.acf"));
        assert!(!pattern.matches("appmanifest_570.acf.tmp"));
        assert!(!pattern.matches("libraryfolders.vdf"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let config = ScanConfig::with_steam_root("/tmp").with_manifest_pattern("appmanifest_[.acf");
        assert!(matches!(
            config.compiled_pattern(),
            Err(ScanError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_from_home_uses_local_share() {
        if let Ok(config) = ScanConfig::from_home() {
            assert!(config.steam_root().ends_with(DEFAULT_STEAM_DIR));
        }
    }
}
