//! Named configuration presets.

use super::types::{AppConfig, ComparisonConfig};
use crate::comparator::ComparatorMode;

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Every difference counts
    Strict,
    /// Order and expected defaults do not matter
    Lenient,
    /// Every leniency mode, with date strings parsed
    Loose,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
            Self::Loose => "loose",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "strict" | "exact" => Some(Self::Strict),
            "lenient" | "len" => Some(Self::Lenient),
            "loose" | "permissive" => Some(Self::Loose),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Strict => "Exact structural equality",
            Self::Lenient => "Ignore element order and defaults in the expected value",
            Self::Loose => "Lenient order, defaults and dates; parse RFC 3339 strings as dates",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Strict, Self::Lenient, Self::Loose]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Strict => Self::default(),
            ConfigPreset::Lenient => Self::lenient_preset(),
            ConfigPreset::Loose => Self::loose_preset(),
        }
    }

    /// Lenient order and ignored defaults for every comparison.
    #[must_use]
    pub fn lenient_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                modes: vec![ComparatorMode::IgnoreDefaults, ComparatorMode::LenientOrder],
                ..ComparisonConfig::default()
            },
            ..Self::default()
        }
    }

    /// All modes, and date strings in documents become dates.
    #[must_use]
    pub fn loose_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                modes: ComparatorMode::ALL.to_vec(),
                lenient_modes: ComparatorMode::ALL.to_vec(),
                parse_dates: true,
            },
            ..Self::default()
        }
    }
}
