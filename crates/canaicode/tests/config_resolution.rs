//! Precedence: CLI flags > settings file > built-in defaults.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use canaicode::cli::{FilterArgs, OutputArgs};
use canaicode::{ResolvedConfig, load_config, resolve_filters, resolve_output};
use canaicode_settings::Settings;
use canaicode_types::{OutputFormat, Selection};
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn resolved(toml: &str) -> ResolvedConfig {
    ResolvedConfig {
        settings: Settings::from_toml(toml).unwrap(),
        path: None,
    }
}

#[test]
fn no_args_no_file_uses_defaults() {
    let filters = resolve_filters(&FilterArgs::default(), &ResolvedConfig::default());
    assert_eq!(filters.languages, Selection::All);
    assert_eq!(filters.teams, Selection::All);
    assert_eq!(filters.period, None);

    let output = resolve_output(&OutputArgs::default(), &ResolvedConfig::default());
    assert_eq!(output.format, OutputFormat::Md);
    assert_eq!(output.decimals, 2);
}

#[test]
fn file_values_apply_when_cli_is_silent() {
    let config = resolved(
        r#"
        [filters]
        teams = ["frontend-team"]
        period = "M"
        authors = 2
        "#,
    );
    let filters = resolve_filters(&FilterArgs::default(), &config);
    assert_eq!(filters.teams, Selection::only(["frontend-team"]));
    assert_eq!(filters.period.as_deref(), Some("M"));
    assert_eq!(filters.authors, Some(2));
}

#[test]
fn cli_values_override_file() {
    let config = resolved(
        r#"
        [filters]
        teams = ["frontend-team"]
        languages = ["Python"]
        "#,
    );
    let args = FilterArgs {
        teams: vec!["backend-team".into()],
        no_languages: true,
        ..Default::default()
    };
    let filters = resolve_filters(&args, &config);
    assert_eq!(filters.teams, Selection::only(["backend-team"]));
    assert_eq!(filters.languages, Selection::nothing());
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load settings"));
}

#[test]
fn config_flag_applies_file_filters() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("team.toml");
    fs::write(&path, "[filters]\nteams = [\"frontend-team\"]\n").unwrap();

    Command::new(env!("CARGO_BIN_EXE_canaicode"))
        .arg("--config")
        .arg(&path)
        .arg("summary")
        .arg("--input")
        .arg(fixture("code_lines.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("|Total changed lines|800|"));
}

#[test]
fn working_directory_config_is_discovered_and_overridable() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("canaicode.toml"),
        "[filters]\nteams = [\"frontend-team\"]\n\n[output]\ndecimals = 1\n",
    )
    .unwrap();

    Command::new(env!("CARGO_BIN_EXE_canaicode"))
        .current_dir(dir.path())
        .arg("summary")
        .arg("--input")
        .arg(fixture("code_lines.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("|Copilot share|50.0%|"));

    Command::new(env!("CARGO_BIN_EXE_canaicode"))
        .current_dir(dir.path())
        .args(["summary", "--team", "backend-team", "--decimals", "2", "--input"])
        .arg(fixture("code_lines.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("|Copilot share|31.82%|"));
}
