//! GameDepot Core Library
//!
//! Discovers the Steam games installed on a Linux machine (Steam Deck or
//! desktop) by reading Steam's own library index and app manifests.
//!
//! # Architecture
//!
//! This library is consumed two ways:
//! - **Plugin hosts**: cdylib/staticlib via the C ABI in the `ffi` module
//! - **Command line**: the `gamedepot` binary
//!
//! # Core Features Implemented
//!
//! ## Library Discovery (`library` module)
//! - `find_library_roots()` - Primary Steam root plus folders from `libraryfolders.vdf`
//!
//! ## Manifest Parsing (`manifest` module)
//! - `read_manifest()` - Tolerant reader for `appmanifest_*.acf` files
//!
//! ## Game Scanning (`registry` module)
//! - `get_installed_games()` - Sorted, deduplicated list; never fails
//! - `scan_installed()` - Same scan with roots and file counts
//!
//! ## Data Structures (`game` module)
//! - `InstalledGame` - Name and appid of a fully installed game
//! - `LibraryRoot` - A Steam library folder
//! - `ManifestRecord` - Raw fields read from one manifest

pub mod config;
pub mod error;
pub mod ffi;
pub mod game;
pub mod library;
pub mod manifest;
pub mod registry;

pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use game::{InstalledGame, LibraryRoot, ManifestRecord};
pub use registry::{get_installed_games, get_installed_games_with, scan_installed, ScanReport};
