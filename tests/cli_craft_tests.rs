//! End-to-end tests for `keyscheme craft`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

mod fixtures;

use fixtures::*;
use keyscheme::models::{RemapEntry, SearchCraftEntry};
use std::fs;

#[test]
fn test_encode_without_remaps() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_empty());

    let result = run_json(
        &["craft", "encode", "-p", path.to_str().unwrap(), "ab1", "--json"],
        config.path(),
    );
    assert_eq!(
        result["intended"],
        serde_json::json!(["KeyA", "KeyB", "Digit1"])
    );
    assert_eq!(result["physical"], result["intended"]);
}

#[test]
fn test_encode_uses_remapped_key() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());

    let result = run_json(
        &["craft", "encode", "-p", path.to_str().unwrap(), "å1", "--json"],
        config.path(),
    );
    assert_eq!(result["intended"], serde_json::json!(["Literal.å", "Digit1"]));
    assert_eq!(result["physical"], serde_json::json!(["KeyQ", "Digit1"]));
    assert_eq!(result["physical_display"], serde_json::json!(["Q", "1"]));
}

#[test]
fn test_encode_reports_unresolvable_characters() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());

    let output = run_keyscheme(
        &["craft", "encode", "-p", path.to_str().unwrap(), "øå"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'ø'"), "stderr: {stderr}");
    assert!(!stderr.contains("'å'"), "stderr: {stderr}");
}

#[test]
fn test_encode_rejects_long_literal() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_empty());

    let output = run_keyscheme(
        &["craft", "encode", "-p", path.to_str().unwrap(), "abcde"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("maximum 4"));
}

#[test]
fn test_decode_round_trip() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());

    let output = run_keyscheme(
        &["craft", "decode", "-p", path.to_str().unwrap(), "KeyQ", "key.1", "KeyA"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "å1a");
}

#[test]
fn test_decode_disabled_key_fails() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());

    let output = run_keyscheme(
        &["craft", "decode", "-p", path.to_str().unwrap(), "MetaLeft"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("MetaLeft"));
}

#[test]
fn test_add_saves_derived_fields() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());
    let profile = path.to_str().unwrap();

    let output = run_keyscheme(
        &["craft", "add", "-p", profile, "å", "--item", "item:amulet"],
        config.path(),
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let saved = read_profile(&path);
    assert_eq!(saved.search_crafts.len(), 1);
    assert_eq!(saved.search_crafts[0].item_refs, vec!["item:amulet"]);
    assert_eq!(saved.search_crafts[0].intended_keys, vec!["Literal.å"]);
    assert_eq!(saved.search_crafts[0].physical_keys, vec!["KeyQ"]);
}

#[test]
fn test_add_unresolvable_leaves_file_untouched() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_empty());
    let before = fs::read_to_string(&path).unwrap();

    let output = run_keyscheme(
        &["craft", "add", "-p", path.to_str().unwrap(), "ø"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Profile not saved"));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_add_rejected_when_search_craft_disabled() {
    let config = temp_config_dir(None);
    let mut profile = test_profile_empty();
    profile.search_craft_enabled = false;
    let (path, temp) = create_temp_profile_file(&profile);

    let output = run_keyscheme(
        &["craft", "add", "-p", path.to_str().unwrap(), "a"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_refresh_recomputes_after_remap_change() {
    let config = temp_config_dir(None);
    let mut profile = test_profile_empty();
    profile.remaps = vec![RemapEntry::new("F2", "Literal.å")];
    // Stored sequence predates the current remaps
    let mut entry = SearchCraftEntry::new(0, "å", vec![]);
    entry.intended_keys = vec!["Literal.å".to_string()];
    entry.physical_keys = vec!["KeyQ".to_string()];
    profile.search_crafts.push(entry);
    let (path, temp) = create_temp_profile_file(&profile);

    let output = run_keyscheme(
        &["craft", "refresh", "-p", path.to_str().unwrap()],
        config.path(),
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let saved = read_profile(&path);
    assert_eq!(saved.search_crafts[0].physical_keys, vec!["F2"]);
}
