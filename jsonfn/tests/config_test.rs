//! Integration tests for Settings loading from files.
//!
//! These tests never rely on the global config; `Settings::from_file` only
//! layers one file over the compiled defaults.

use std::fs;

use tempfile::TempDir;

use jsonfn::config::{Settings, SettingsError};
use jsonfn::{NamingConvention, NestedErrorPolicy};

#[test]
fn given_full_config_file_when_loading_then_all_values_applied() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jsonfn.toml");
    fs::write(
        &path,
        r#"
[projection]
naming = "verbatim"
max_depth = 6
nested_errors = "omit"

[output]
pretty = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::from_file(&path).expect("load settings");

    // Assert
    assert_eq!(settings.projection.naming, NamingConvention::Verbatim);
    assert_eq!(settings.projection.max_depth, 6);
    assert_eq!(settings.projection.nested_errors, NestedErrorPolicy::Omit);
    assert!(settings.output.pretty);

    let options = settings.projection_options();
    assert_eq!(options.max_depth, 6);
    assert_eq!(options.nested_errors, NestedErrorPolicy::Omit);
}

#[test]
fn given_partial_config_file_when_loading_then_defaults_fill_the_rest() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jsonfn.toml");
    fs::write(&path, "[output]\npretty = true\n").unwrap();

    let settings = Settings::from_file(&path).unwrap();

    assert!(settings.output.pretty);
    assert_eq!(settings.projection, Settings::default().projection);
}

#[test]
fn given_missing_explicit_config_when_loading_then_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, SettingsError::NotFound(p) if p == path));
}

#[test]
fn given_invalid_toml_when_loading_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[projection\nmax_depth = ").unwrap();

    let err = Settings::from_file(&path).unwrap_err();

    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_unknown_naming_value_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jsonfn.toml");
    fs::write(&path, "[projection]\nnaming = \"shouting\"\n").unwrap();

    assert!(matches!(
        Settings::from_file(&path),
        Err(SettingsError::Parse { .. })
    ));
}
