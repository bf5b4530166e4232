//! Configuration file loading and discovery.

use super::defaults::ConfigPreset;
use super::types::{AppConfig, OutputFormat};
use crate::comparator::ComparatorMode;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".reflect-assert.yaml",
    ".reflect-assert.yml",
    "reflect-assert.yaml",
    "reflect-assert.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/reflect-assert/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("reflect-assert")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Settings given explicitly on the command line.
///
/// Every `Some` wins over the loaded file, including values equal to the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replaces the whole `comparison` section
    pub preset: Option<ConfigPreset>,
    /// Added to the preset's modes, or replacing the file's modes without a preset
    pub modes: Vec<ComparatorMode>,
    /// Add `comparison.lenient_modes` to the active modes
    pub lenient: bool,
    pub parse_dates: Option<bool>,
    pub max_depth: Option<usize>,
    pub max_elements: Option<usize>,
    pub format: Option<OutputFormat>,
    pub quiet: Option<bool>,
}

impl AppConfig {
    /// Apply command-line overrides on top of this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(preset) = overrides.preset {
            self.comparison = Self::from_preset(preset).comparison;
        }
        if !overrides.modes.is_empty() {
            if overrides.preset.is_none() {
                self.comparison.modes.clear();
            }
            for mode in &overrides.modes {
                if !self.comparison.modes.contains(mode) {
                    self.comparison.modes.push(*mode);
                }
            }
        }
        if overrides.lenient {
            for mode in self.comparison.lenient_modes.clone() {
                if !self.comparison.modes.contains(&mode) {
                    self.comparison.modes.push(mode);
                }
            }
        }
        if let Some(parse_dates) = overrides.parse_dates {
            self.comparison.parse_dates = parse_dates;
        }
        if let Some(depth) = overrides.max_depth {
            self.format.max_depth = depth;
        }
        if let Some(elements) = overrides.max_elements {
            self.format.max_elements = elements;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(quiet) = overrides.quiet {
            self.output.quiet = quiet;
        }
    }

    /// Load from file and apply CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.apply_overrides(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# reflect-assert configuration
# Place this file at .reflect-assert.yaml in your project root or ~/.config/reflect-assert/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".reflect-assert.yaml");
        std::fs::write(&config_path, "comparison:\n  parse_dates: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
comparison:
  modes: [ignore-defaults, lenient-dates]
format:
  max_depth: 5
output:
  format: json
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(
            config.comparison.modes,
            vec![ComparatorMode::IgnoreDefaults, ComparatorMode::LenientDates]
        );
        assert_eq!(config.format.max_depth, 5);
        assert_eq!(config.format.max_elements, 15);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "comparison:\n  modes: [sideways]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides_win_even_at_defaults() {
        let mut config = AppConfig::builder()
            .mode(ComparatorMode::LenientOrder)
            .max_depth(5)
            .output_format(OutputFormat::Json)
            .quiet(true)
            .build();
        let overrides = ConfigOverrides {
            preset: Some(ConfigPreset::Strict),
            max_depth: Some(3),
            format: Some(OutputFormat::Text),
            quiet: Some(false),
            ..ConfigOverrides::default()
        };

        config.apply_overrides(&overrides);

        assert!(config.comparison.modes.is_empty());
        assert_eq!(config.format.max_depth, 3);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.output.quiet);
    }

    #[test]
    fn test_override_modes() {
        let mut config = AppConfig::builder().mode(ComparatorMode::LenientDates).build();
        config.apply_overrides(&ConfigOverrides {
            modes: vec![ComparatorMode::LenientOrder],
            ..ConfigOverrides::default()
        });
        assert_eq!(config.comparison.modes, vec![ComparatorMode::LenientOrder]);

        config.apply_overrides(&ConfigOverrides {
            preset: Some(ConfigPreset::Lenient),
            modes: vec![ComparatorMode::LenientDates],
            ..ConfigOverrides::default()
        });
        assert_eq!(config.comparison.modes.len(), 3);
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let file = AppConfig::builder().max_depth(7).parse_dates(true).build();
        let mut config = file.clone();
        config.apply_overrides(&ConfigOverrides::default());
        assert_eq!(config, file);
    }

    #[test]
    fn test_lenient_adds_configured_modes() {
        let mut config = AppConfig::builder()
            .lenient_modes([ComparatorMode::LenientDates])
            .build();
        config.apply_overrides(&ConfigOverrides {
            lenient: true,
            ..ConfigOverrides::default()
        });
        assert_eq!(config.comparison.modes, vec![ComparatorMode::LenientDates]);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("comparison:"));
        assert!(example.contains("max_elements"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "format:\n  max_depth: 2\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
