//! End-to-end tests for `keyscheme keys` and `keyscheme translate`.

mod fixtures;

use fixtures::*;

#[test]
fn test_keys_search_json_orders_exact_first() {
    let config = temp_config_dir(None);
    let result = run_json(&["keys", "search", "f1", "--json"], config.path());

    assert_eq!(result["query"], "f1");
    let keys = result["keys"].as_array().unwrap();
    assert_eq!(keys[0]["code"], "F1");
    // F10..F19 follow as prefix matches
    assert!(keys.iter().skip(1).any(|k| k["code"] == "F10"));
    assert_eq!(result["count"].as_u64().unwrap() as usize, keys.len());
}

#[test]
fn test_keys_search_category_filter() {
    let config = temp_config_dir(None);
    let result = run_json(
        &["keys", "search", "button", "--category", "mouse", "--json"],
        config.path(),
    );

    let keys = result["keys"].as_array().unwrap();
    assert!(!keys.is_empty());
    assert!(keys.iter().all(|k| k["category"] == "mouse"));
    assert!(keys.iter().any(|k| k["code"] == "MouseBack"));
}

#[test]
fn test_keys_search_unknown_category_fails() {
    let config = temp_config_dir(None);
    let output = run_keyscheme(
        &["keys", "search", "a", "--category", "gamepad"],
        config.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown category 'gamepad'"));
}

#[test]
fn test_keys_show_json() {
    let config = temp_config_dir(None);
    let result = run_json(&["keys", "show", "ShiftLeft", "--json"], config.path());

    assert_eq!(result["code"], "ShiftLeft");
    assert_eq!(result["name"], "Left Shift");
    assert_eq!(result["category"], "modifier");
    assert_eq!(result["legacy"], "key.lshift");
    assert_eq!(result["macro"], "LShift");
    assert_eq!(result["row"], 3);
}

#[test]
fn test_keys_show_literal_is_synthesized() {
    let config = temp_config_dir(None);
    let result = run_json(&["keys", "show", "Literal.å", "--json"], config.path());

    assert_eq!(result["category"], "literal_character");
    assert_eq!(result["macro"], "å");
    assert!(result.get("legacy").is_none());
}

#[test]
fn test_keys_show_unknown_fails() {
    let config = temp_config_dir(None);
    let output = run_keyscheme(&["keys", "show", "KeyÆ"], config.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_translate_legacy_to_all_namespaces() {
    let config = temp_config_dir(None);
    let result = run_json(&["translate", "key.lshift", "--json"], config.path());

    assert_eq!(result["source"], "legacy");
    assert_eq!(result["canonical"], "ShiftLeft");
    assert_eq!(result["legacy"], "key.lshift");
    assert_eq!(result["display"], "Left Shift");
    assert_eq!(result["macro"], "LShift");
}

#[test]
fn test_translate_to_single_namespace() {
    let config = temp_config_dir(None);
    let output = run_keyscheme(&["translate", "MouseBack", "--to", "macro"], config.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "XButton1");

    let output = run_keyscheme(&["translate", "Numpad1", "--to", "legacy"], config.path());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "key.numpad.1");
}

#[test]
fn test_translate_custom_legacy_is_derived() {
    let config = temp_config_dir(None);
    let result = run_json(&["translate", "key.custom.p1.7", "--json"], config.path());

    assert_eq!(result["source"], "custom");
    assert_eq!(result["canonical"], "Custom.p1.7");
    assert_eq!(result["legacy"], "key.custom.p1.7");
}

#[test]
fn test_translate_unknown_passes_through() {
    let config = temp_config_dir(None);
    let result = run_json(&["translate", "key.brand_new", "--json"], config.path());

    assert_eq!(result["source"], "pass_through");
    assert_eq!(result["canonical"], "key.brand_new");
    assert_eq!(result["legacy"], "key.brand_new");
    assert_eq!(result["display"], "Brand New");
    assert_eq!(result["macro"], "key.brand_new");
}
