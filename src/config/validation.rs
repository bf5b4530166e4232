//! Configuration validation.

use super::types::{AppConfig, ComparisonConfig, FormatConfig, OutputConfig};
use crate::comparator::ComparatorMode;

/// Upper bound for `format.max_depth`.
const MAX_FORMAT_DEPTH: usize = 64;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.comparison.validate());
        errors.extend(self.format.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_duplicates("comparison.modes", &self.modes, &mut errors);
        check_duplicates("comparison.lenient_modes", &self.lenient_modes, &mut errors);
        errors
    }
}

fn check_duplicates(field: &str, modes: &[ComparatorMode], errors: &mut Vec<ConfigError>) {
    for (index, mode) in modes.iter().enumerate() {
        if modes[..index].contains(mode) {
            errors.push(ConfigError {
                field: field.to_string(),
                message: format!("Mode '{mode}' is listed more than once"),
            });
        }
    }
}

impl Validatable for FormatConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(1..=MAX_FORMAT_DEPTH).contains(&self.max_depth) {
            errors.push(ConfigError {
                field: "format.max_depth".to_string(),
                message: format!(
                    "Depth must be between 1 and {MAX_FORMAT_DEPTH}, got {}",
                    self.max_depth
                ),
            });
        }
        if self.max_elements == 0 {
            errors.push(ConfigError {
                field: "format.max_elements".to_string(),
                message: "At least one element must be shown".to_string(),
            });
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_duplicate_modes() {
        let config = ComparisonConfig {
            modes: vec![ComparatorMode::LenientOrder, ComparatorMode::LenientOrder],
            ..ComparisonConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "comparison.modes");
        assert!(errors[0].to_string().contains("lenient-order"));
    }

    #[test]
    fn test_format_limits() {
        let config = FormatConfig {
            max_depth: 0,
            max_elements: 0,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);

        let deep = FormatConfig {
            max_depth: MAX_FORMAT_DEPTH + 1,
            ..FormatConfig::default()
        };
        assert!(!deep.is_valid());
    }
}
