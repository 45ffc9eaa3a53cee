//! End-to-end tests for `keyscheme config`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

mod fixtures;

use fixtures::*;
use keyscheme::config::Config;
use std::fs;

#[test]
fn test_config_show_defaults_without_file() {
    let config = temp_config_dir(None);

    let result = run_json(&["config", "show", "--json"], config.path());
    assert_eq!(result["exists"], false);
    assert!(result["file"].as_str().unwrap().ends_with("config.toml"));
    assert_eq!(result["export"]["include_header"], true);
    assert_eq!(result["export"]["disabled_directive"], "return");
    assert_eq!(result["logging"]["level"], "warn");
    assert!(result["paths"]["profiles_dir"].is_null());
}

#[test]
fn test_config_set_creates_file_and_round_trips() {
    let root = temp_config_dir(None);
    let config_dir = root.path().join("nested");
    let profiles = tempfile::TempDir::new().unwrap();

    let output = run_keyscheme(
        &[
            "config",
            "set",
            "--profiles-dir",
            profiles.path().to_str().unwrap(),
            "--include-header",
            "false",
            "--disabled-directive",
            "Return",
            "--log-level",
            "INFO",
        ],
        &config_dir,
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!config_dir.join("config.toml.tmp").exists());

    let saved =
        Config::from_toml(&fs::read_to_string(config_dir.join("config.toml")).unwrap()).unwrap();
    assert_eq!(saved.paths.profiles_dir.as_deref(), Some(profiles.path()));
    assert!(!saved.export.include_header);
    assert_eq!(saved.export.disabled_directive, "Return");
    assert_eq!(saved.logging.level, "info");

    let result = run_json(&["config", "show", "--json"], &config_dir);
    assert_eq!(result["exists"], true);
    assert_eq!(result["export"]["disabled_directive"], "Return");
}

#[test]
fn test_config_set_keeps_unrelated_values() {
    let config = temp_config_dir(Some("[export]\ndisabled_directive = \"Return\"\n"));

    let output = run_keyscheme(&["config", "set", "--log-level", "debug"], config.path());
    assert_eq!(output.status.code(), Some(0));

    let result = run_json(&["config", "show", "--json"], config.path());
    assert_eq!(result["export"]["disabled_directive"], "Return");
    assert_eq!(result["logging"]["level"], "debug");
}

#[test]
fn test_config_set_requires_an_option() {
    let config = temp_config_dir(None);

    let output = run_keyscheme(&["config", "set"], config.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(!config.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let config = temp_config_dir(None);

    let output = run_keyscheme(&["config", "set", "--log-level", "loud"], config.path());
    assert_eq!(output.status.code(), Some(1));

    let output = run_keyscheme(
        &["config", "set", "--profiles-dir", "/nonexistent/profiles"],
        config.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!config.path().join("config.toml").exists());
}

#[test]
fn test_config_show_reports_broken_file() {
    let config = temp_config_dir(Some("[logging]\nlevel = \"loud\"\n"));

    let output = run_keyscheme(&["config", "show"], config.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}
