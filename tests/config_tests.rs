//! Integration tests for configuration loading and the compare command.

use reflect_assert::cli::{compare_files, render_outcome, EXIT_DIFFERENT, EXIT_EQUAL};
use reflect_assert::comparator::{ComparatorMode, ModeSet};
use reflect_assert::config::{
    generate_json_schema, load_config_file, load_or_default, AppConfig, ConfigOverrides,
    ConfigPreset, OutputFormat, Validatable,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn yaml_config_drives_comparison() {
    let dir = TempDir::new().unwrap();
    let config_path = write(
        &dir,
        ".reflect-assert.yaml",
        "comparison:\n  modes: [lenient-order, lenient-dates]\n  parse_dates: true\n",
    );
    let left = write(
        &dir,
        "left.json",
        r#"{"seen": "2024-01-01T00:00:00Z", "tags": ["a", "b"]}"#,
    );
    let right = write(
        &dir,
        "right.json",
        r#"{"seen": "2025-06-30T12:00:00Z", "tags": ["b", "a"]}"#,
    );

    let config = load_config_file(&config_path).unwrap();
    assert!(config.is_valid());
    assert_eq!(
        config.comparison.mode_set(),
        ModeSet::strict()
            .with(ComparatorMode::LenientOrder)
            .with(ComparatorMode::LenientDates)
    );

    let outcome = compare_files(&left, &right, &config).unwrap();
    assert!(outcome.is_equal());
    assert_eq!(outcome.exit_code(), EXIT_EQUAL);

    let strict = compare_files(&left, &right, &AppConfig::default()).unwrap();
    assert_eq!(strict.exit_code(), EXIT_DIFFERENT);
}

#[test]
fn explicit_path_wins_in_load_or_default() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "custom.yml", "format:\n  max_elements: 4\n");
    let (config, loaded_from) = load_or_default(Some(&config_path));
    assert_eq!(loaded_from, Some(config_path));
    assert_eq!(config.format.max_elements, 4);
}

#[test]
fn flags_at_default_values_beat_the_file() {
    let dir = TempDir::new().unwrap();
    let config_path = write(
        &dir,
        ".reflect-assert.yaml",
        "comparison:\n  modes: [lenient-order]\nformat:\n  max_depth: 5\noutput:\n  format: json\n  quiet: true\n",
    );
    let overrides = ConfigOverrides {
        preset: Some(ConfigPreset::Strict),
        max_depth: Some(3),
        format: Some(OutputFormat::Text),
        quiet: Some(false),
        ..ConfigOverrides::default()
    };

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(Some(config_path.as_path()), &overrides);
    assert_eq!(loaded_from, Some(config_path));
    assert!(config.comparison.mode_set().is_strict());
    assert_eq!(config.format.max_depth, 3);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(!config.output.quiet);
}

#[test]
fn file_values_survive_without_flags() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "reflect.yaml", "format:\n  max_depth: 5\n");
    let (config, _) =
        AppConfig::from_file_with_overrides(Some(config_path.as_path()), &ConfigOverrides::default());
    assert_eq!(config.format.max_depth, 5);
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "broken.yaml", "format: [not, a, map]\n");
    let (config, loaded_from) = load_or_default(Some(&config_path));
    assert!(loaded_from.is_none());
    assert_eq!(config, AppConfig::default());
}

#[test]
fn presets_round_trip_through_yaml() {
    for preset in ConfigPreset::all() {
        let config = AppConfig::from_preset(*preset);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config, "preset {preset}");
        assert!(parsed.is_valid());
    }
}

#[test]
fn schema_is_valid_json() {
    let schema: serde_json::Value = serde_json::from_str(&generate_json_schema()).unwrap();
    assert_eq!(schema["title"], "AppConfig");
    assert!(schema["properties"]["format"].is_object());
}

#[test]
fn text_report_snapshot() {
    let dir = TempDir::new().unwrap();
    let left = write(&dir, "left.yaml", "user:\n  name: ann\n  roles: [admin, dev]\n");
    let right = write(&dir, "right.yaml", "user:\n  name: ann\n  roles: [admin]\n");
    let config = AppConfig::default();

    let outcome = compare_files(&left, &right, &config).unwrap();
    insta::assert_snapshot!(render_outcome(&outcome, &config).unwrap(), @r#"
    Different collection sizes. Left size: 2, right size: 1
    Field: <user.roles> expected: <["admin", "dev"]> but was: <["admin"]>
    "#);
}

#[test]
fn json_report_for_equal_documents() {
    let dir = TempDir::new().unwrap();
    let left = write(&dir, "same.json", r#"{"n": 1.5}"#);
    let config = AppConfig::builder()
        .output_format(OutputFormat::Json)
        .build();
    let outcome = compare_files(&left, &left, &config).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&render_outcome(&outcome, &config).unwrap()).unwrap();
    assert_eq!(parsed, serde_json::json!({"equal": true, "modes": "strict"}));
}
