//! FFI (Foreign Function Interface) bindings for plugin hosts.
//!
//! This module exposes the installed-games scan through C-compatible functions
//! so a host process (e.g. a Steam Deck plugin loader) can link the library
//! directly instead of shelling out to the `gamedepot` binary.
//!
//! # Memory Management
//!
//! - Rust allocates memory and returns pointers to the host
//! - The calling code MUST call the corresponding `_free` functions to prevent leaks
//! - Strings are null-terminated UTF-8
//!
//! # Usage from C
//!
//! ```c
//! CGameList *games = gamedepot_scan_games();
//! for (int i = 0; i < gamedepot_game_list_count(games); i++) {
//!     CGame *game = gamedepot_game_list_get(games, i);
//!     printf("%s\t%s\n", game->appid, game->name);
//!     gamedepot_free_game(game);
//! }
//! gamedepot_free_game_list(games);
//! ```

use crate::config::ScanConfig;
use crate::registry::{get_installed_games, get_installed_games_with};
use crate::InstalledGame;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

// ============================================================================
// C-Compatible Types
// ============================================================================

/// Opaque handle to a list of installed games
#[repr(C)]
pub struct CGameList {
    games: Vec<InstalledGame>,
}

/// C-compatible game information
#[repr(C)]
pub struct CGame {
    pub name: *mut c_char,
    pub appid: *mut c_char,
}

// ============================================================================
// Game Scanning
// ============================================================================

/// Scan the default Steam location for installed games.
/// Returns an opaque handle to the game list (empty if the scan failed).
/// Caller MUST call gamedepot_free_game_list() when done.
#[no_mangle]
pub extern "C" fn gamedepot_scan_games() -> *mut CGameList {
    into_list_handle(panic::catch_unwind(get_installed_games))
}

/// Scan a Steam installation at an explicit root directory.
/// Returns null if `steam_root` is null or not valid UTF-8.
/// Caller MUST call gamedepot_free_game_list() when done.
///
/// # Safety
///
/// `steam_root` must be null or point to a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn gamedepot_scan_games_at(steam_root: *const c_char) -> *mut CGameList {
    if steam_root.is_null() {
        return ptr::null_mut();
    }

    let root = match CStr::from_ptr(steam_root).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    let config = ScanConfig::with_steam_root(root);
    into_list_handle(panic::catch_unwind(AssertUnwindSafe(|| {
        get_installed_games_with(&config)
    })))
}

/// Get the number of games in a list.
#[no_mangle]
pub extern "C" fn gamedepot_game_list_count(list: *const CGameList) -> c_int {
    if list.is_null() {
        return 0;
    }
    unsafe { (*list).games.len() as c_int }
}

/// Get game information at a specific index.
/// Returns a CGame struct. Caller MUST call gamedepot_free_game() when done.
#[no_mangle]
pub extern "C" fn gamedepot_game_list_get(list: *const CGameList, index: c_int) -> *mut CGame {
    if list.is_null() || index < 0 {
        return ptr::null_mut();
    }

    let games = unsafe { &(*list).games };
    let Some(game) = games.get(index as usize) else {
        return ptr::null_mut();
    };

    Box::into_raw(Box::new(CGame {
        name: string_to_c_char(&game.name),
        appid: string_to_c_char(&game.appid),
    }))
}

/// Serialize the list as a JSON array of `{"name", "appid"}` objects.
/// Caller MUST call gamedepot_free_string() when done.
#[no_mangle]
pub extern "C" fn gamedepot_game_list_to_json(list: *const CGameList) -> *mut c_char {
    if list.is_null() {
        return ptr::null_mut();
    }

    let games = unsafe { &(*list).games };
    match serde_json::to_string(games) {
        Ok(json) => string_to_c_char(&json),
        Err(e) => {
            tracing::error!(error = %e, "Error serializing game list");
            ptr::null_mut()
        }
    }
}

/// Free a game list returned by gamedepot_scan_games().
#[no_mangle]
pub extern "C" fn gamedepot_free_game_list(list: *mut CGameList) {
    if !list.is_null() {
        unsafe {
            let _ = Box::from_raw(list);
        }
    }
}

/// Free a CGame struct returned by gamedepot_game_list_get().
#[no_mangle]
pub extern "C" fn gamedepot_free_game(game: *mut CGame) {
    if !game.is_null() {
        unsafe {
            let g = Box::from_raw(game);
            free_c_char(g.name);
            free_c_char(g.appid);
        }
    }
}

// ============================================================================
// String Management
// ============================================================================

/// Free a string returned by FFI functions.
#[no_mangle]
pub extern "C" fn gamedepot_free_string(s: *mut c_char) {
    free_c_char(s);
}

// ============================================================================
// Helper Functions
// ============================================================================

fn into_list_handle(result: std::thread::Result<Vec<InstalledGame>>) -> *mut CGameList {
    let games = result.unwrap_or_else(|_| {
        tracing::error!("Game scan panicked, returning empty list");
        Vec::new()
    });
    Box::into_raw(Box::new(CGameList { games }))
}

fn string_to_c_char(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn free_c_char(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}
