//! End-to-end scans over fake Steam installations.

use gamedepot_core::ffi::{
    gamedepot_free_game_list, gamedepot_game_list_count, gamedepot_game_list_to_json,
    gamedepot_free_string, gamedepot_scan_games_at,
};
use gamedepot_core::{
    get_installed_games_with, scan_installed, InstalledGame, LibraryRoot, ScanConfig,
};
use std::ffi::{CStr, CString};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct FakeSteam {
    _temp: TempDir,
    base: PathBuf,
    root: PathBuf,
}

impl FakeSteam {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let base = temp.path().to_path_buf();
        let root = base.join("Steam");
        fs::create_dir_all(root.join("steamapps")).unwrap();
        Self {
            _temp: temp,
            base,
            root,
        }
    }

    fn config(&self) -> ScanConfig {
        ScanConfig::with_steam_root(&self.root)
    }

    /// Creates an extra library folder with a `steamapps` directory.
    fn library(&self, name: &str) -> PathBuf {
        let path = self.base.join(name);
        fs::create_dir_all(path.join("steamapps")).unwrap();
        path
    }

    fn write_index(&self, libraries: &[&Path]) {
        let mut vdf = String::from("\"libraryfolders\"\n{\n");
        for (i, lib) in libraries.iter().enumerate() {
            vdf.push_str(&format!(
                "\t\"{}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t\t\"label\"\t\t\"\"\n\t}}\n",
                i,
                lib.display()
            ));
        }
        vdf.push_str("}\n");
        fs::write(self.root.join("steamapps/libraryfolders.vdf"), vdf).unwrap();
    }
}

fn write_manifest(library: &Path, appid: &str, name: &str, flags: &str) {
    let content = format!(
        "\"AppState\"\n{{\n\t\"appid\"\t\t\"{}\"\n\t\"Universe\"\t\t\"1\"\n\t\"name\"\t\t\"{}\"\n\t\"StateFlags\"\t\t\"{}\"\n\t\"installdir\"\t\t\"{}\"\n}}\n",
        appid, name, flags, name
    );
    fs::write(
        library.join("steamapps").join(format!("appmanifest_{}.acf", appid)),
        content,
    )
    .unwrap();
}

fn game(name: &str, appid: &str) -> InstalledGame {
    InstalledGame {
        name: name.to_string(),
        appid: appid.to_string(),
    }
}

#[test]
fn test_installed_games_are_listed() {
    let steam = FakeSteam::new();
    write_manifest(&steam.root, "570", "Dota 2", "4");
    write_manifest(&steam.root, "620", "Portal 2", "4");

    let games = get_installed_games_with(&steam.config());
    assert_eq!(games, vec![game("Dota 2", "570"), game("Portal 2", "620")]);
}

#[test]
fn test_partially_installed_games_are_excluded() {
    let steam = FakeSteam::new();
    write_manifest(&steam.root, "10", "Game One", "4");
    write_manifest(&steam.root, "20", "Half Finished", "2");
    write_manifest(&steam.root, "30", "Updating", "1026");
    write_manifest(&steam.root, "40", "Padded", "04");

    let games = get_installed_games_with(&steam.config());
    assert_eq!(games, vec![game("Game One", "10")]);
}

#[test]
fn test_manifest_without_appid_or_name_is_excluded() {
    let steam = FakeSteam::new();
    let dir = steam.root.join("steamapps");
    fs::write(dir.join("appmanifest_1.acf"), "\"name\" \"No Id\"\n\"StateFlags\" \"4\"\n").unwrap();
    fs::write(dir.join("appmanifest_2.acf"), "\"appid\" \"2\"\n\"StateFlags\" \"4\"\n").unwrap();

    assert!(get_installed_games_with(&steam.config()).is_empty());
}

#[test]
fn test_duplicate_appid_across_libraries_first_wins() {
    let steam = FakeSteam::new();
    let sdcard = steam.library("sdcard");
    steam.write_index(&[&steam.root, &sdcard]);
    write_manifest(&steam.root, "10", "Game One", "4");
    write_manifest(&sdcard, "10", "Game One Duplicate", "4");

    let games = get_installed_games_with(&steam.config());
    assert_eq!(games, vec![game("Game One", "10")]);
}

#[test]
fn test_duplicate_appid_within_library_first_file_wins() {
    let steam = FakeSteam::new();
    let dir = steam.root.join("steamapps");
    fs::write(
        dir.join("appmanifest_10.acf"),
        "\"appid\" \"10\"\n\"name\" \"Original\"\n\"StateFlags\" \"4\"\n",
    )
    .unwrap();
    fs::write(
        dir.join("appmanifest_10_copy.acf"),
        "\"appid\" \"10\"\n\"name\" \"Copy\"\n\"StateFlags\" \"4\"\n",
    )
    .unwrap();

    let games = get_installed_games_with(&steam.config());
    assert_eq!(games, vec![game("Original", "10")]);
}

#[test]
fn test_games_sorted_case_insensitively_across_libraries() {
    let steam = FakeSteam::new();
    let sdcard = steam.library("sdcard");
    steam.write_index(&[&sdcard]);
    write_manifest(&steam.root, "1", "zebra", "4");
    write_manifest(&sdcard, "2", "Apple", "4");
    write_manifest(&sdcard, "3", "banana", "4");

    let names: Vec<_> = get_installed_games_with(&steam.config())
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Apple", "banana", "zebra"]);
}

#[test]
fn test_missing_steam_root_returns_empty_list() {
    let temp = TempDir::new().unwrap();
    let config = ScanConfig::with_steam_root(temp.path().join("NoSteam"));

    assert!(get_installed_games_with(&config).is_empty());
    let report = scan_installed(&config).unwrap();
    assert!(report.roots.is_empty());
}

#[test]
fn test_malformed_index_still_scans_primary() {
    let steam = FakeSteam::new();
    write_manifest(&steam.root, "10", "Game One", "4");
    fs::write(
        steam.root.join("steamapps/libraryfolders.vdf"),
        "\"libraryfolders\"\n{\n\t\"0\"\n\t{\n\t\t\"path\"\t\t\"/mnt/trunc",
    )
    .unwrap();

    let report = scan_installed(&steam.config()).unwrap();
    assert_eq!(report.roots, vec![LibraryRoot::new(&steam.root)]);
    assert_eq!(report.games, vec![game("Game One", "10")]);
}

#[test]
fn test_library_listed_in_index_but_missing_is_ignored() {
    let steam = FakeSteam::new();
    let unplugged = steam.base.join("unplugged");
    steam.write_index(&[&steam.root, &unplugged]);
    write_manifest(&steam.root, "10", "Game One", "4");

    let report = scan_installed(&steam.config()).unwrap();
    assert_eq!(report.roots, vec![LibraryRoot::new(&steam.root)]);
}

#[test]
fn test_library_without_steamapps_is_skipped() {
    let steam = FakeSteam::new();
    let bare = steam.base.join("bare");
    fs::create_dir_all(&bare).unwrap();
    steam.write_index(&[&bare]);
    write_manifest(&steam.root, "10", "Game One", "4");

    let report = scan_installed(&steam.config()).unwrap();
    assert_eq!(report.roots.len(), 2);
    assert_eq!(report.games, vec![game("Game One", "10")]);
}

#[test]
fn test_unreadable_manifest_does_not_abort_scan() {
    let steam = FakeSteam::new();
    write_manifest(&steam.root, "10", "Game One", "4");
    // Matches the pattern but is a directory, so reading it fails
    fs::create_dir_all(steam.root.join("steamapps/appmanifest_99.acf")).unwrap();

    let report = scan_installed(&steam.config()).unwrap();
    assert_eq!(report.games, vec![game("Game One", "10")]);
    assert_eq!(report.manifests_scanned, 2);
    assert_eq!(report.manifests_failed, 1);
}

#[test]
fn test_report_serializes_games_and_roots() {
    let steam = FakeSteam::new();
    write_manifest(&steam.root, "10", "Game One", "4");

    let report = scan_installed(&steam.config()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["games"], serde_json::json!([{ "name": "Game One", "appid": "10" }]));
    assert_eq!(json["manifests_scanned"], 1);
    assert!(json["scanned_at"].is_string());
}

#[test]
fn test_ffi_scan_at_root() {
    let steam = FakeSteam::new();
    write_manifest(&steam.root, "10", "Game One", "4");
    write_manifest(&steam.root, "20", "Half Finished", "2");

    let root = CString::new(steam.root.to_str().unwrap()).unwrap();
    let list = unsafe { gamedepot_scan_games_at(root.as_ptr()) };
    assert!(!list.is_null());
    assert_eq!(gamedepot_game_list_count(list), 1);

    let json = gamedepot_game_list_to_json(list);
    let text = unsafe { CStr::from_ptr(json) }.to_str().unwrap().to_string();
    assert_eq!(text, r#"[{"name":"Game One","appid":"10"}]"#);

    gamedepot_free_string(json);
    gamedepot_free_game_list(list);
}
