//! Configuration for reflect-assert.
//!
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```
//! use reflect_assert::comparator::ComparatorMode;
//! use reflect_assert::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Lenient);
//! assert!(config.is_valid());
//!
//! let config = AppConfig::builder()
//!     .mode(ComparatorMode::LenientDates)
//!     .max_elements(5)
//!     .build();
//! assert_eq!(config.format.max_elements, 5);
//! ```
//!
//! # Configuration File
//!
//! Place a `.reflect-assert.yaml` file in your project root or
//! `~/.config/reflect-assert/`:
//!
//! ```yaml
//! comparison:
//!   modes: [lenient-order]
//!   parse_dates: true
//! format:
//!   max_depth: 4
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, ComparisonConfig, FormatConfig, OutputConfig, OutputFormat,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, ConfigOverrides,
};

/// JSON Schema for the `.reflect-assert.yaml` format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("\"comparison\""));
        assert!(schema.contains("lenient-order"));
    }
}
