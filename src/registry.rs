//! Installed game scanning for GameDepot.
//!
//! This module walks every Steam library folder, parses the app manifests it
//! finds and builds the list of fully installed games.
//!
//! # Failure Policy
//!
//! Steam rewrites manifests while it runs, so partial or unreadable files are
//! expected. The scan is best-effort:
//!
//! - An unreadable manifest is logged and skipped
//! - An unreadable `libraryfolders.vdf` leaves only the primary library
//! - A library without a `steamapps` directory is skipped
//! - Anything that still fails surfaces as an empty list from
//!   [`get_installed_games`]

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use crate::library::find_library_roots;
use crate::manifest::read_manifest;
use crate::{InstalledGame, LibraryRoot};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Outcome of a full scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Installed games, sorted case-insensitively by name.
    pub games: Vec<InstalledGame>,
    /// Library roots in the order they were scanned.
    pub roots: Vec<LibraryRoot>,
    /// Manifest files matched by the pattern.
    pub manifests_scanned: usize,
    /// Manifest files that could not be read.
    pub manifests_failed: usize,
    pub scanned_at: DateTime<Local>,
}

/// Returns the installed games under `~/.local/share/Steam` and its extra
/// library folders. Never fails: errors are logged and yield an empty list.
pub fn get_installed_games() -> Vec<InstalledGame> {
    match ScanConfig::from_home() {
        Ok(config) => get_installed_games_with(&config),
        Err(e) => {
            error!(error = %e, "Error getting installed games");
            Vec::new()
        }
    }
}

/// Like [`get_installed_games`] but with an explicit configuration.
pub fn get_installed_games_with(config: &ScanConfig) -> Vec<InstalledGame> {
    match scan_installed(config) {
        Ok(report) => report.games,
        Err(e) => {
            error!(error = %e, "Error getting installed games");
            Vec::new()
        }
    }
}

/// Scans all library roots and returns the full report.
///
/// Per-file and per-library problems are recovered here; only a broken
/// configuration is returned as an error.
pub fn scan_installed(config: &ScanConfig) -> ScanResult<ScanReport> {
    let pattern = config.compiled_pattern()?;
    let roots = find_library_roots(config);

    let mut games = Vec::new();
    let mut seen_appids = HashSet::new();
    let mut manifests_scanned = 0;
    let mut manifests_failed = 0;

    for root in &roots {
        let manifest_dir = root.manifest_dir(&config.manifest_dir);
        if !manifest_dir.exists() {
            debug!(path = %manifest_dir.display(), "No manifest directory, skipping library");
            continue;
        }

        let manifests = match list_manifests(&manifest_dir, &pattern) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "Skipping library");
                continue;
            }
        };

        for manifest in manifests {
            manifests_scanned += 1;
            let record = match read_manifest(&manifest) {
                Ok(record) => record,
                Err(e) => {
                    manifests_failed += 1;
                    warn!(error = %e, "Failed to parse ACF file");
                    continue;
                }
            };

            if let Some(game) = record.into_installed() {
                // first library wins for an appid
                if seen_appids.insert(game.appid.clone()) {
                    games.push(game);
                } else {
                    debug!(appid = %game.appid, path = %manifest.display(), "Duplicate appid skipped");
                }
            }
        }
    }

    sort_by_name(&mut games);
    info!(
        "Found {} unique installed games from {} total",
        games.len(),
        seen_appids.len()
    );

    Ok(ScanReport {
        games,
        roots,
        manifests_scanned,
        manifests_failed,
        scanned_at: Local::now(),
    })
}

/// Lists entries directly inside `dir` whose names match `pattern`, sorted by
/// file name. Entries that turn out not to be readable files fail later, in
/// [`read_manifest`], and are counted there.
fn list_manifests(dir: &Path, pattern: &glob::Pattern) -> ScanResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::ManifestDirRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut manifests: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| pattern.matches(n))
        })
        .collect();
    manifests.sort();

    Ok(manifests)
}

/// Sorts games by lowercased name. Equal names keep scan order.
fn sort_by_name(games: &mut [InstalledGame]) {
    games.sort_by_cached_key(|game| game.name.to_lowercase());
}
