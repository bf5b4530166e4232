//! **Reflection-style deep equality with configurable leniency.**
//!
//! `reflect-assert` compares two object graphs field by field and reports the
//! first point where they diverge. Graphs may contain cycles, arrays, lists,
//! sets, maps and nested objects. Comparison can be relaxed with modes that
//! ignore element order, skip fields left at their default in the expected
//! value, or treat any two non-null dates as equal.
//!
//! ## Core Concepts & Modules
//!
//! - **[`value`]**: the reflectable value model. Rust has no runtime
//!   reflection, so types describe their fields once through a
//!   [`ClassDescriptor`] and implement [`Reflect`].
//! - **[`comparator`]**: the [`Comparator`] chain, one chain per
//!   [`ModeSet`], and the [`ReflectionComparator`] entry point that returns a
//!   [`Difference`].
//! - **[`format`]**: the [`ValueFormatter`] and the text report of a
//!   difference.
//! - **[`assert`]**: panicking and non-panicking assertions, including
//!   property assertions such as `"lines[0].sku"`.
//! - **[`config`]**: YAML configuration, presets and validation.
//!
//! ## Comparing Two Values
//!
//! ```
//! use reflect_assert::{ModeSet, ReflectionComparator, Value};
//!
//! let left = Value::list([1, 2, 3]);
//! let right = Value::list([3, 1, 2]);
//!
//! let strict = ReflectionComparator::strict();
//! let difference = strict.get_difference(&left, &right)?.expect("order differs");
//! assert_eq!(difference.field_path(), ["0"]);
//!
//! let lenient = ReflectionComparator::new(ModeSet::lenient());
//! assert!(lenient.is_equal(&left, &right)?);
//! # Ok::<(), reflect_assert::ReflectionError>(())
//! ```
//!
//! ## Assertions
//!
//! ```
//! use reflect_assert::{assert_len_eq, assert_ref_eq};
//! use reflect_assert::comparator::ComparatorMode;
//!
//! assert_ref_eq!(vec!["a", "b"], vec!["a", "b"]);
//! assert_ref_eq!(vec![1, 2], vec![2, 1], ComparatorMode::LenientOrder);
//! assert_len_eq!(vec![3, 4], vec![4, 3]);
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `reflect-assert` binary compares two JSON or YAML documents:
//! `reflect-assert compare expected.json actual.json --lenient`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::similar_names
)]

pub mod assert;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod error;
pub mod format;
pub mod value;

// Re-export main types for convenience
pub use assert::{
    assert_lenient_eq, assert_property_lenient_eq, assert_property_reflection_eq,
    assert_reflection_eq, check_lenient_eq, check_reflection_eq, AssertionFailure,
    ReflectionAssert,
};
pub use comparator::{
    Comparator, ComparatorChain, ComparatorChainFactory, ComparatorMode, Comparison, Difference,
    ModeSet, ReflectionComparator,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{ErrorContext, OptionContext, ReflectionError, Result};
pub use format::{DifferenceReport, ValueFormatter};
pub use value::{ClassDescriptor, ObjectRef, Reflect, Value};
