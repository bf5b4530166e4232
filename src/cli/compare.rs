//! Compare command handler.
//!
//! Implements the `compare` subcommand: structural comparison of two JSON or
//! YAML documents.

use crate::comparator::{Difference, ReflectionComparator};
use crate::config::{AppConfig, OutputFormat, Validatable};
use crate::format::{DifferenceReport, ValueFormatter};
use crate::value::{from_json_str, from_yaml_str, DocumentOptions, Value};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;

/// Exit status when the documents are equal.
pub const EXIT_EQUAL: i32 = 0;
/// Exit status when the documents differ.
pub const EXIT_DIFFERENT: i32 = 1;
/// Exit status when the comparison could not run.
pub const EXIT_ERROR: i32 = 2;

/// Document syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` are YAML; everything else is read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and convert one document.
pub fn load_document(path: &Path, options: &DocumentOptions) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => from_json_str(&text, options),
        DocumentFormat::Yaml => from_yaml_str(&text, options),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;
    tracing::debug!("Loaded {} as {}", path.display(), value.type_name());
    Ok(value)
}

/// Outcome of comparing two documents.
#[derive(Debug)]
pub struct CompareOutcome {
    pub difference: Option<Difference>,
}

impl CompareOutcome {
    #[must_use]
    pub const fn is_equal(&self) -> bool {
        self.difference.is_none()
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_equal() {
            EXIT_EQUAL
        } else {
            EXIT_DIFFERENT
        }
    }
}

/// Compare two documents on disk under `config`.
pub fn compare_files(left: &Path, right: &Path, config: &AppConfig) -> Result<CompareOutcome> {
    let errors = config.validate();
    if !errors.is_empty() {
        let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration: {}", listed.join("; "));
    }

    let options = DocumentOptions {
        parse_dates: config.comparison.parse_dates,
    };
    let left_value = load_document(left, &options)?;
    let right_value = load_document(right, &options)?;

    let modes = config.comparison.mode_set();
    tracing::debug!("Comparing {} and {} ({modes})", left.display(), right.display());

    let difference = ReflectionComparator::new(modes)
        .get_difference(&left_value, &right_value)
        .context("comparison failed")?;
    Ok(CompareOutcome { difference })
}

/// Run the compare command, returning the process exit status.
pub fn run_compare(left: &Path, right: &Path, config: &AppConfig) -> Result<i32> {
    let outcome = compare_files(left, right, config)?;
    if !config.output.quiet {
        let rendered = render_outcome(&outcome, config)?;
        println!("{rendered}");
    }
    Ok(outcome.exit_code())
}

/// Render an outcome in the configured output format.
pub fn render_outcome(outcome: &CompareOutcome, config: &AppConfig) -> Result<String> {
    let formatter = config.format.formatter();
    match config.output.format {
        OutputFormat::Text => Ok(outcome.difference.as_ref().map_or_else(
            || "equal".to_string(),
            |difference| {
                DifferenceReport::new(difference)
                    .with_formatter(formatter)
                    .to_string()
            },
        )),
        OutputFormat::Json => {
            let report = JsonReport::new(outcome, config, formatter);
            serde_json::to_string_pretty(&report).context("failed to serialize report")
        }
    }
}

#[derive(Serialize)]
struct JsonReport {
    equal: bool,
    modes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    difference: Option<JsonDifference>,
}

#[derive(Serialize)]
struct JsonDifference {
    message: String,
    path: Vec<String>,
    left: String,
    right: String,
}

impl JsonReport {
    fn new(outcome: &CompareOutcome, config: &AppConfig, formatter: ValueFormatter) -> Self {
        Self {
            equal: outcome.is_equal(),
            modes: config.comparison.mode_set().to_string(),
            difference: outcome.difference.as_ref().map(|d| JsonDifference {
                message: d.message().to_string(),
                path: d.field_path().to_vec(),
                left: formatter.format(d.left_value()),
                right: formatter.format(d.right_value()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::ComparatorMode;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_document_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), DocumentFormat::Json);
    }

    #[test]
    fn test_equal_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left.json", r#"{"name": "a", "tags": ["x", "y"]}"#);
        let right = write(&dir, "right.yaml", "name: a\ntags: [x, y]\n");

        let outcome = compare_files(&left, &right, &AppConfig::default()).unwrap();
        assert!(outcome.is_equal());
        assert_eq!(outcome.exit_code(), EXIT_EQUAL);
        assert_eq!(
            render_outcome(&outcome, &AppConfig::default()).unwrap(),
            "equal"
        );
    }

    #[test]
    fn test_difference_and_lenient_order() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left.json", r#"{"tags": [1, 2, 3]}"#);
        let right = write(&dir, "right.json", r#"{"tags": [3, 1, 2]}"#);

        let strict = compare_files(&left, &right, &AppConfig::default()).unwrap();
        assert_eq!(strict.exit_code(), EXIT_DIFFERENT);
        let difference = strict.difference.as_ref().unwrap();
        assert_eq!(difference.field_path(), ["tags", "0"]);

        let lenient = AppConfig::builder()
            .mode(ComparatorMode::LenientOrder)
            .build();
        assert!(compare_files(&left, &right, &lenient).unwrap().is_equal());
    }

    #[test]
    fn test_json_report() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left.json", r#"{"a": 1}"#);
        let right = write(&dir, "right.json", r#"{"a": 2}"#);
        let config = AppConfig::builder().output_format(OutputFormat::Json).build();

        let outcome = compare_files(&left, &right, &config).unwrap();
        let rendered = render_outcome(&outcome, &config).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["equal"], false);
        assert_eq!(parsed["modes"], "strict");
        assert_eq!(parsed["difference"]["path"], serde_json::json!(["a"]));
        assert_eq!(parsed["difference"]["left"], "1");
        assert_eq!(parsed["difference"]["right"], "2");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let right = write(&dir, "right.json", "{}");
        let result = compare_files(&dir.path().join("absent.json"), &right, &AppConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left.json", "1");
        let config = AppConfig::builder().max_elements(0).build();
        let error = compare_files(&left, &left, &config).unwrap_err();
        assert!(error.to_string().contains("format.max_elements"));
    }
}
