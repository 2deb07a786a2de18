//! Settings loading tests

use std::io::Write;

use htmlschema::validators::{DiagnosticCode, Validator};
use htmlschema::{Error, Settings, TokenCase};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn write_settings(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_settings_file() {
    let file = write_settings(
        r#"{
            "passthrough_prefixes": ["data-", "aria-", "hx-"],
            "rel_token_case": "ascii-insensitive",
            "extra_link_types": [
                { "token": "me", "hosts": ["a", "LINK"], "description": "IndieAuth identity" },
                { "token": "webmention", "hosts": ["link"], "experimental": true }
            ]
        }"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.rel_token_case, TokenCase::AsciiInsensitive);
    assert_eq!(settings.passthrough_prefixes.len(), 3);
    assert_eq!(settings.extra_link_types.len(), 2);

    let validator = Validator::with_settings(settings).unwrap();
    assert!(validator.validate("a", [("rel", "Me"), ("hx-get", "/x")]).is_empty());

    let diagnostics = validator.validate("link", [("rel", "me webmention")]);
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::ExperimentalAttribute]);
    assert_eq!(diagnostics[0].token.as_deref(), Some("webmention"));
}

#[test]
fn test_empty_settings_file_uses_defaults() {
    let file = write_settings("{}");
    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_invalid_json() {
    let file = write_settings("{ not json");
    assert!(matches!(Settings::from_file(file.path()), Err(Error::Json(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_inconsistent_settings_are_rejected() {
    let file = write_settings(r#"{ "extra_link_types": [ { "token": "two words", "hosts": ["a"] } ] }"#);
    assert!(matches!(Settings::from_file(file.path()), Err(Error::Settings(_))));

    let file = write_settings(r#"{ "extra_link_types": [ { "token": "me", "hosts": [] } ] }"#);
    assert!(matches!(Settings::from_file(file.path()), Err(Error::Settings(_))));

    let file = write_settings(r#"{ "passthrough_prefixes": [""] }"#);
    assert!(matches!(Settings::from_file(file.path()), Err(Error::Settings(_))));
}

#[test]
fn test_vocabulary_limit() {
    let file = write_settings(
        r#"{
            "limits": { "max_vocabulary_size": 1 },
            "extra_link_types": [
                { "token": "me", "hosts": ["a"] },
                { "token": "you", "hosts": ["a"] }
            ]
        }"#,
    );
    assert!(matches!(Settings::from_file(file.path()), Err(Error::LimitExceeded(_))));
}

#[test]
fn test_builtin_table_respects_limits() {
    let file = write_settings(r#"{ "limits": { "max_vocabulary_size": 8 } }"#);
    let settings = Settings::from_file(file.path()).unwrap();

    assert!(matches!(
        Validator::with_settings(settings),
        Err(Error::LimitExceeded(_))
    ));
}
