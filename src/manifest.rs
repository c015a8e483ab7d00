//! App manifest (`appmanifest_*.acf`) parsing.
//!
//! ACF files are Valve KeyValues text:
//!
//! ```text
//! "AppState"
//! {
//!     "appid"        "570"
//!     "name"         "Dota 2"
//!     "StateFlags"   "4"
//!     ...
//! }
//! ```
//!
//! Only three flat keys matter here, so lines are matched by prefix and the
//! value is the fourth `"`-separated token. Nesting is ignored and lines that
//! do not fit the shape are skipped.

use crate::error::{ScanError, ScanResult};
use crate::ManifestRecord;
use std::fs;
use std::path::Path;

const APPID_KEY: &str = "\"appid\"";
const NAME_KEY: &str = "\"name\"";
const STATE_FLAGS_KEY: &str = "\"StateFlags\"";

/// `StateFlags` value meaning fully installed and up to date.
pub const STATE_FULLY_INSTALLED: &str = "4";

/// Reads and parses a manifest file.
///
/// Invalid UTF-8 is dropped rather than rejected. Only I/O failures are errors.
pub fn read_manifest(path: &Path) -> ScanResult<ManifestRecord> {
    let bytes = fs::read(path).map_err(|e| ScanError::ManifestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_manifest(&decode_lossy(&bytes)))
}

/// Parses manifest text. Later occurrences of a key overwrite earlier ones.
pub fn parse_manifest(content: &str) -> ManifestRecord {
    let mut record = ManifestRecord::default();

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with(APPID_KEY) {
            if let Some(value) = quoted_value(line) {
                record.appid = Some(value.to_string());
            }
        } else if line.starts_with(NAME_KEY) {
            if let Some(value) = quoted_value(line) {
                record.name = Some(value.to_string());
            }
        } else if line.starts_with(STATE_FLAGS_KEY) {
            if let Some(value) = quoted_value(line) {
                record.installed = Some(value == STATE_FULLY_INSTALLED);
            }
        }
    }

    record
}

/// Value of a `"key"  "value"` line: the fourth token when split on `"`.
fn quoted_value(line: &str) -> Option<&str> {
    line.split('"').nth(3)
}

/// Decodes UTF-8, silently skipping invalid byte sequences.
fn decode_lossy(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix is UTF-8
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    // truncated sequence at end of input
                    None => return out,
                }
            }
        }
    }
}
