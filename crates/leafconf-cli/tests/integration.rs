//! Integration tests for leafconf CLI
//!
//! These tests check real files on disk, expanded from paths and globs.

use std::fs;

use leafconf_cli::{check_files, outline_command, render_report, OutputFormat};
use leafconf_lsp::config::{RuleSeverity, Settings};
use tempfile::TempDir;

const VALID: &str = "\
[General]
loglevel = info

[Proxy]
Direct = direct

[Rule]
FINAL, Direct
";

const BROKEN: &str = "\
[Proxy]
Direct = direct

[Rule]
DOMAIN, example.com, Missing
";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("valid.conf"), VALID).unwrap();
    fs::write(dir.path().join("broken.conf"), BROKEN).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a config").unwrap();
    dir
}

fn path_arg(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).display().to_string()
}

#[test]
fn test_check_single_valid_file() {
    let dir = workspace();
    let files = check_files(&[path_arg(&dir, "valid.conf")], &Settings::default()).unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].report.is_clean());
}

#[test]
fn test_check_glob_collects_all_files() {
    let dir = workspace();
    let files = check_files(&[path_arg(&dir, "*.conf")], &Settings::default()).unwrap();

    assert_eq!(files.len(), 2);
    let broken = files.iter().find(|f| f.file.ends_with("broken.conf")).unwrap();
    // Undefined rule target and missing FINAL
    assert_eq!(broken.report.errors, 1);
    assert_eq!(broken.report.warnings, 1);
    assert!(broken
        .report
        .diagnostics
        .iter()
        .all(|d| d.file.as_deref() == Some(broken.file.as_str())));
}

#[test]
fn test_check_applies_settings() {
    let dir = workspace();
    let mut settings = Settings::default();
    settings.diagnostics.missing_final = RuleSeverity::Ignore;

    let files = check_files(&[path_arg(&dir, "broken.conf")], &settings).unwrap();
    assert_eq!(files[0].report.warnings, 0);
    assert_eq!(files[0].report.errors, 1);
}

#[test]
fn test_check_missing_input() {
    let dir = workspace();
    let err = check_files(&[path_arg(&dir, "nothing-*.conf")], &Settings::default()).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_json_report_is_machine_readable() {
    let dir = workspace();
    let files = check_files(&[path_arg(&dir, "broken.conf")], &Settings::default()).unwrap();
    let json = render_report(&files, OutputFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["errors"], 1);
    assert_eq!(value[0]["diagnostics"][0]["code"], "LC411");
}

#[test]
fn test_outline_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = outline_command(&dir.path().join("absent.conf")).unwrap_err();
    assert!(err.to_string().contains("Failed to read input file"));
}
