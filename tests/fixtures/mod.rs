//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{TimeZone, Utc};
use keyscheme::models::{Profile, RemapEntry};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the keyscheme binary
pub fn keyscheme_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyscheme")
}

/// Creates an empty profile with deterministic metadata.
pub fn test_profile_empty() -> Profile {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let modified = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();

    Profile {
        id: "p1".to_string(),
        name: "Test Profile".to_string(),
        created,
        modified,
        remaps: Vec::new(),
        search_craft_enabled: true,
        search_crafts: Vec::new(),
        custom_keys: Vec::new(),
        next_custom_key_index: 0,
    }
}

/// Creates a profile with a handful of typical remaps.
///
/// - 0: `CapsLock → ControlLeft`
/// - 1: `KeyQ → Literal.å` (so "å" becomes typeable)
/// - 2: `MouseBack → KeyE`
/// - 3: `MetaLeft → Disabled`
pub fn test_profile_with_remaps() -> Profile {
    let mut profile = test_profile_empty();
    profile.remaps = vec![
        RemapEntry::new("CapsLock", "ControlLeft"),
        RemapEntry::new("KeyQ", "Literal.å"),
        RemapEntry::new("MouseBack", "KeyE"),
        RemapEntry::disabled("MetaLeft"),
    ];
    profile
}

/// Writes a profile to a fresh temp dir.
///
/// Returns the file path and the temp dir, which must be kept alive.
pub fn create_temp_profile_file(profile: &Profile) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("profile.json");
    write_profile(profile, &path);
    (path, temp_dir)
}

/// Writes a profile as pretty JSON.
pub fn write_profile(profile: &Profile, path: &Path) {
    let json = serde_json::to_string_pretty(profile).expect("Failed to serialize profile");
    fs::write(path, json).expect("Failed to write profile");
}

/// Reads a profile written by the CLI.
pub fn read_profile(path: &Path) -> Profile {
    let content = fs::read_to_string(path).expect("Failed to read profile");
    serde_json::from_str(&content).expect("Failed to parse profile")
}

/// Creates an isolated config directory, optionally with a config.toml.
pub fn temp_config_dir(config_toml: Option<&str>) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp config dir");
    if let Some(content) = config_toml {
        fs::write(dir.path().join("config.toml"), content).expect("Failed to write config");
    }
    dir
}

/// Runs the binary with an isolated config directory.
pub fn run_keyscheme(args: &[&str], config_dir: &Path) -> Output {
    Command::new(keyscheme_bin())
        .args(args)
        .env("KEYSCHEME_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Runs the binary and parses stdout as JSON, asserting success.
pub fn run_json(args: &[&str], config_dir: &Path) -> serde_json::Value {
    let output = run_keyscheme(args, config_dir);
    assert_eq!(
        output.status.code(),
        Some(0),
        "Command {:?} should succeed. stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON")
}
