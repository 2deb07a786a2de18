//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output};

fn htmlschema(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_htmlschema"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[test]
fn test_cli_validate_clean() {
    let output = htmlschema(&["validate", "a", "href=/", "rel=noopener noreferrer"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "clean bag should succeed");
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_cli_validate_warning_exit_code() {
    let output = htmlschema(&["validate", "link", "rel=stylesheet nofollow"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("RelTypeHostMismatch"));
    assert!(stdout.contains("nofollow"));
}

#[test]
fn test_cli_validate_info_only_succeeds() {
    let output = htmlschema(&["validate", "area", "nohref"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "deprecation is informational");
    assert!(stdout.contains("DeprecatedAttribute"));
}

#[test]
fn test_cli_validate_json_output() {
    let output = htmlschema(&["validate", "--json", "area", "shape=Rect"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let diagnostics = json.as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["code"], "InvalidValue");
    assert_eq!(diagnostics[0]["attribute"], "shape");
    assert_eq!(diagnostics[0]["allowed_values"][3], "rect");
}

#[test]
fn test_cli_validate_with_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{ "extra_link_types": [ {{ "token": "me", "hosts": ["a"] }} ] }}"#).unwrap();

    let path = config.path().to_str().unwrap();
    let output = htmlschema(&["validate", "--config", path, "a", "rel=me"]);
    assert!(output.status.success());

    let output = htmlschema(&["validate", "a", "rel=me"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_bad_config() {
    let output = htmlschema(&["validate", "--config", "/nonexistent/settings.json", "a"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error"));
}

// ============================================================================
// Inspect Command Tests
// ============================================================================

#[test]
fn test_cli_inspect_area() {
    let output = htmlschema(&["inspect", "area"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Element: <area>"));
    assert!(stdout.contains("image-map-area -> hyperlink"));
    assert!(stdout.contains("shape : enum(circle | default | poly | rect)"));
    assert!(stdout.contains("nohref : boolean [deprecated]"));
}

#[test]
fn test_cli_inspect_json() {
    let output = htmlschema(&["inspect", "--json", "a"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["tag"], "a");
    assert_eq!(json["known"], true);
    assert_eq!(json["lineage"][0], "hyperlink");
    assert_eq!(json["attributes"]["rel"]["constraint"]["kind"], "closed_token_set");
}

// ============================================================================
// Link Types Command Tests
// ============================================================================

#[test]
fn test_cli_link_types_for_host() {
    let output = htmlschema(&["link-types", "--host", "link"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("stylesheet"));
    assert!(!stdout.contains("nofollow"));
    assert!(stdout.contains("[experimental]"));
}

#[test]
fn test_cli_link_types_json() {
    let output = htmlschema(&["link-types", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 33);
    assert_eq!(entries[0]["token"], "alternate");
}
