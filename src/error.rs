//! Unified error types for reflect-assert.
//!
//! A returned [`Difference`](crate::comparator::Difference) is a normal
//! comparison outcome and never an error. The errors in this module are the
//! fatal conditions: a comparator chain that cannot handle a pair of values,
//! a field that cannot be read, or a property path that cannot be resolved.

use crate::value::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reflect-assert operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReflectionError {
    /// No comparator in the chain claimed the pair of values
    #[error(
        "No comparator found for values at field '{}'. Left: {left} ({}), right: {right} ({})",
        .path.join("."),
        .left.type_name(),
        .right.type_name()
    )]
    NoComparator {
        left: Box<Value>,
        right: Box<Value>,
        path: Vec<String>,
    },

    /// A field value could not be read from an instance
    #[error("Unable to read field '{field}' of {class}: {reason}")]
    FieldAccess {
        class: String,
        field: String,
        reason: String,
    },

    /// A field that the class does not declare was addressed
    #[error("Class {class} has no field named '{field}'")]
    UnknownField { class: String, field: String },

    /// Errors while resolving a bean-style property path
    #[error("Unable to resolve property '{property}': {context}")]
    Property {
        property: String,
        context: String,
        #[source]
        source: PropertyErrorKind,
    },

    /// Errors while converting documents into the value model
    #[error("Conversion failed: {context}")]
    Conversion {
        context: String,
        #[source]
        source: ConversionErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific property resolution error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PropertyErrorKind {
    #[error("Invalid property path syntax: {0}")]
    InvalidSyntax(String),

    #[error("No property '{name}' on {owner}{hint}")]
    UnknownProperty {
        name: String,
        owner: String,
        hint: String,
    },

    #[error("Index {index} out of bounds (size {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Cannot navigate into {0}")]
    NotNavigable(String),

    #[error("Null value encountered at '{0}'")]
    NullValue(String),
}

/// Specific conversion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConversionErrorKind {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Unsupported document value: {0}")]
    Unsupported(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for reflect-assert operations
pub type Result<T> = std::result::Result<T, ReflectionError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ReflectionError {
    /// Create the error raised when a chain has no catch-all comparator
    pub fn no_comparator(left: &Value, right: &Value, path: &[String]) -> Self {
        Self::NoComparator {
            left: Box::new(left.clone()),
            right: Box::new(right.clone()),
            path: path.to_vec(),
        }
    }

    /// Create a field access error
    pub fn field_access(
        class: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::FieldAccess {
            class: class.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(class: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            class: class.into(),
            field: field.into(),
        }
    }

    /// Create a property resolution error
    pub fn property(
        property: impl Into<String>,
        context: impl Into<String>,
        source: PropertyErrorKind,
    ) -> Self {
        Self::Property {
            property: property.into(),
            context: context.into(),
            source,
        }
    }

    /// Create a conversion error
    pub fn conversion(context: impl Into<String>, source: ConversionErrorKind) -> Self {
        Self::Conversion {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ReflectionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ReflectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::conversion(
            "JSON deserialization",
            ConversionErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for ReflectionError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::conversion(
            "YAML deserialization",
            ConversionErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is chained in front of any existing context, so a
/// failure deep inside a property lookup reads as
/// `"outer: inner: original"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ReflectionError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ReflectionError, new_ctx: &str) -> ReflectionError {
    match err {
        ReflectionError::Property {
            property,
            context: existing,
            source,
        } => ReflectionError::Property {
            property,
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReflectionError::Conversion {
            context: existing,
            source,
        } => ReflectionError::Conversion {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReflectionError::Io {
            path,
            message,
            source,
        } => ReflectionError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ReflectionError::FieldAccess {
            class,
            field,
            reason,
        } => ReflectionError::FieldAccess {
            class,
            field,
            reason: chain_context(new_ctx, &reason),
        },
        ReflectionError::Config(msg) => ReflectionError::Config(chain_context(new_ctx, &msg)),
        ReflectionError::Validation(msg) => {
            ReflectionError::Validation(chain_context(new_ctx, &msg))
        }
        other => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ReflectionError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| ReflectionError::Validation(f().into()))
    }
}
