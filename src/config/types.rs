//! Configuration types for reflect-assert.

use crate::comparator::{ComparatorMode, ModeSet};
use crate::format::{ValueFormatter, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from `.reflect-assert.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison modes
    pub comparison: ComparisonConfig,
    /// Value formatting limits
    pub format: FormatConfig,
    /// Command-line output
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Replace the default comparison modes.
    pub fn modes(mut self, modes: impl IntoIterator<Item = ComparatorMode>) -> Self {
        self.config.comparison.modes = modes.into_iter().collect();
        self
    }

    /// Add one comparison mode.
    pub fn mode(mut self, mode: ComparatorMode) -> Self {
        if !self.config.comparison.modes.contains(&mode) {
            self.config.comparison.modes.push(mode);
        }
        self
    }

    /// Replace the modes added by `--lenient`.
    pub fn lenient_modes(mut self, modes: impl IntoIterator<Item = ComparatorMode>) -> Self {
        self.config.comparison.lenient_modes = modes.into_iter().collect();
        self
    }

    pub const fn parse_dates(mut self, parse: bool) -> Self {
        self.config.comparison.parse_dates = parse;
        self
    }

    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.format.max_depth = depth;
        self
    }

    pub const fn max_elements(mut self, elements: usize) -> Self {
        self.config.format.max_elements = elements;
        self
    }

    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.output.quiet = quiet;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Comparison Configuration
// ============================================================================

/// Which leniency modes apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Modes for plain comparisons; empty means strict
    pub modes: Vec<ComparatorMode>,
    /// Modes added by `compare --lenient` and used by
    /// `ReflectionAssert::lenient_from_config`; the free `*_lenient_*`
    /// assertions always use ignore-defaults with lenient order
    pub lenient_modes: Vec<ComparatorMode>,
    /// Treat RFC 3339 strings in documents as dates
    pub parse_dates: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            modes: Vec::new(),
            lenient_modes: vec![ComparatorMode::IgnoreDefaults, ComparatorMode::LenientOrder],
            parse_dates: false,
        }
    }
}

impl ComparisonConfig {
    #[must_use]
    pub fn mode_set(&self) -> ModeSet {
        self.modes.iter().collect()
    }

    #[must_use]
    pub fn lenient_mode_set(&self) -> ModeSet {
        self.lenient_modes.iter().collect()
    }
}

// ============================================================================
// Format Configuration
// ============================================================================

/// Limits applied when rendering values in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FormatConfig {
    /// Object nesting rendered before collapsing to `Name<...>`
    pub max_depth: usize,
    /// Elements shown per collection or map
    pub max_elements: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl FormatConfig {
    #[must_use]
    pub const fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.max_depth, self.max_elements)
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output format of the `compare` command.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Command-line output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
    /// Print nothing, only set the exit status
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.comparison.mode_set().is_strict());
        assert_eq!(config.comparison.lenient_mode_set(), ModeSet::lenient());
        assert_eq!(config.format.formatter(), ValueFormatter::default());
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .mode(ComparatorMode::LenientDates)
            .mode(ComparatorMode::LenientDates)
            .parse_dates(true)
            .max_elements(5)
            .output_format(OutputFormat::Json)
            .build();
        assert_eq!(config.comparison.modes, vec![ComparatorMode::LenientDates]);
        assert!(config.comparison.parse_dates);
        assert_eq!(config.format.max_elements, 5);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("comparison:\n  modes: [lenient-order]\n").expect("valid yaml");
        assert_eq!(config.comparison.modes, vec![ComparatorMode::LenientOrder]);
        assert_eq!(config.format, FormatConfig::default());
        assert_eq!(config.comparison.lenient_mode_set(), ModeSet::lenient());
    }
}
