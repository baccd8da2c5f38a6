//! Mobile filesystem path helpers.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const APP_DIR_NAME: &str = "priorities";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Shared writable app data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir).clone()
}

/// Directory for captured photos and clips awaiting save.
#[must_use]
pub fn captures_dir() -> PathBuf {
    data_dir().join("captures")
}

fn resolve_data_dir() -> PathBuf {
    let selected = data_dir_candidates()
        .into_iter()
        .next()
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME));

    tracing::info!("Resolved mobile data directory: {}", selected.display());
    selected
}

/// Writable data directories in priority order.
#[must_use]
pub fn data_dir_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for base in candidate_base_dirs() {
        let candidate = base.join(APP_DIR_NAME);
        if ensure_writable_dir(&candidate) && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

fn candidate_base_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = std::env::var_os("PRIORITIES_DATA_DIR").map(PathBuf::from) {
        candidates.push(path);
    }
    if let Some(path) = dirs::data_local_dir() {
        candidates.push(path);
    }
    if let Some(path) = dirs::data_dir() {
        candidates.push(path);
    }
    if let Some(path) = std::env::var_os("HOME").map(PathBuf::from) {
        candidates.push(path);
    }
    candidates.push(std::env::temp_dir());
    candidates
}

fn ensure_writable_dir(path: &Path) -> bool {
    if std::fs::create_dir_all(path).is_err() {
        return false;
    }

    let test_file = path.join(".priorities-write-test");
    let Ok(mut file) = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&test_file)
    else {
        return false;
    };

    let writable = file.write_all(b"ok").is_ok();
    let _ = std::fs::remove_file(test_file);
    writable
}
