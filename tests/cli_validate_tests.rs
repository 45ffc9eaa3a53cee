//! End-to-end tests for `keyscheme validate`, `custom` and `init-profile`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

mod fixtures;

use fixtures::*;
use keyscheme::models::{RemapEntry, SearchCraftEntry};

#[test]
fn test_validate_clean_profile() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());

    let result = run_json(
        &["validate", "-p", path.to_str().unwrap(), "--json"],
        config.path(),
    );
    assert_eq!(result["valid"], true);
    assert_eq!(result["checks"]["search_crafts"], "passed");
    assert_eq!(result["checks"]["custom_keys"], "passed");
}

#[test]
fn test_validate_unresolvable_search_craft() {
    let config = temp_config_dir(None);
    let mut profile = test_profile_empty();
    profile
        .search_crafts
        .push(SearchCraftEntry::new(3, "øa", vec![]));
    let (path, temp) = create_temp_profile_file(&profile);

    let output = run_keyscheme(
        &["validate", "-p", path.to_str().unwrap(), "--json"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));

    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(result["valid"], false);
    assert_eq!(result["checks"]["search_crafts"], "failed");
    let messages = result["messages"].as_array().unwrap();
    assert_eq!(messages[0]["kind"], "unresolvable_characters");
    assert_eq!(messages[0]["sequence"], 3);
}

#[test]
fn test_validate_cycles_are_only_warnings() {
    let config = temp_config_dir(None);
    let mut profile = test_profile_empty();
    profile.remaps = vec![
        RemapEntry::new("KeyA", "KeyB"),
        RemapEntry::new("KeyB", "KeyA"),
    ];
    let (path, temp) = create_temp_profile_file(&profile);
    let profile_arg = path.to_str().unwrap();

    let result = run_json(&["validate", "-p", profile_arg, "--json"], config.path());
    assert_eq!(result["valid"], true);
    let messages = result["messages"].as_array().unwrap();
    assert!(messages
        .iter()
        .any(|m| m["severity"] == "warning" && m["message"].as_str().unwrap().contains("cycle")));

    let strict = run_keyscheme(&["validate", "-p", profile_arg, "--strict"], config.path());
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_custom_mint_is_stable_and_never_reused() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_empty());
    let profile = path.to_str().unwrap();

    let first = run_json(
        &["custom", "mint", "-p", profile, "--label", "G1", "--json"],
        config.path(),
    );
    let second = run_json(
        &["custom", "mint", "-p", profile, "--label", "G1", "--json"],
        config.path(),
    );
    assert_eq!(first["code"], "Custom.p1.0");
    assert_eq!(first["legacy"], "key.custom.p1.0");
    assert_eq!(second["code"], "Custom.p1.1");

    let saved = read_profile(&path);
    assert_eq!(saved.next_custom_key_index, 2);
    assert_eq!(saved.custom_keys.len(), 2);

    // Legacy id of a minted key translates back to the same code
    let translated = run_json(
        &["translate", first["legacy"].as_str().unwrap(), "--json"],
        config.path(),
    );
    assert_eq!(translated["canonical"], first["code"]);

    let list = run_json(&["custom", "list", "-p", profile, "--json"], config.path());
    assert_eq!(list["count"], 2);
    assert_eq!(list["next_index"], 2);
    assert_eq!(list["keys"][1]["label"], "G1");
}

#[test]
fn test_minted_key_can_be_remapped_and_exported() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_empty());
    let profile = path.to_str().unwrap();

    let minted = run_json(
        &["custom", "mint", "-p", profile, "--label", "Thumb", "--json"],
        config.path(),
    );
    let code = minted["code"].as_str().unwrap();

    let output = run_keyscheme(&["remap", "set", "-p", profile, code, "F13"], config.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Thumb -> F13"));
}

#[test]
fn test_init_profile_creates_valid_file() {
    let config = temp_config_dir(None);
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("main.json");

    let result = run_json(
        &[
            "init-profile",
            path.to_str().unwrap(),
            "--name",
            "Main",
            "--json",
        ],
        config.path(),
    );
    assert_eq!(result["name"], "Main");

    let saved = read_profile(&path);
    assert_eq!(saved.name, "Main");
    assert!(saved.search_craft_enabled);
    assert!(uuid::Uuid::parse_str(&saved.id).is_ok());
}

#[test]
fn test_init_profile_refuses_overwrite() {
    let config = temp_config_dir(None);
    let (path, temp) = create_temp_profile_file(&test_profile_with_remaps());

    let output = run_keyscheme(
        &["init-profile", path.to_str().unwrap(), "--name", "Other"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(read_profile(&path).name, "Test Profile");

    let output = run_keyscheme(
        &[
            "init-profile",
            path.to_str().unwrap(),
            "--name",
            "Other",
            "--force",
        ],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(read_profile(&path).name, "Other");
}

#[test]
fn test_init_profile_rejects_empty_name() {
    let config = temp_config_dir(None);
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("p.json");

    let output = run_keyscheme(
        &["init-profile", path.to_str().unwrap(), "--name", "  "],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());
}
