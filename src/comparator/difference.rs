//! The first point of divergence between two graphs.

use crate::value::Value;
use std::fmt;

/// Where and why two graphs differ.
///
/// The field path names every field, element index or map key entered on
/// the way from the roots to the divergent values. An empty path means the
/// roots themselves differ.
#[derive(Debug, Clone)]
pub struct Difference {
    message: String,
    field_path: Vec<String>,
    left_value: Value,
    right_value: Value,
}

impl Difference {
    pub fn new(
        message: impl Into<String>,
        left_value: Value,
        right_value: Value,
        field_path: Vec<String>,
    ) -> Self {
        Self {
            message: message.into(),
            field_path,
            left_value,
            right_value,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn field_path(&self) -> &[String] {
        &self.field_path
    }

    /// The path joined with dots, e.g. `orders.2.price`.
    #[must_use]
    pub fn field_path_string(&self) -> String {
        self.field_path.join(".")
    }

    /// The path without its final segment.
    ///
    /// For an element of a collection this is the path of the collection
    /// itself.
    #[must_use]
    pub fn parent_path(&self) -> &[String] {
        match self.field_path.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    #[must_use]
    pub const fn left_value(&self) -> &Value {
        &self.left_value
    }

    #[must_use]
    pub const fn right_value(&self) -> &Value {
        &self.right_value
    }

    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.field_path.is_empty()
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::DifferenceReport::new(self).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_paths() {
        let diff = Difference::new(
            "Different primitive values",
            Value::from(2),
            Value::from(99),
            path(&["inner", "1"]),
        );
        assert_eq!(diff.field_path_string(), "inner.1");
        assert_eq!(diff.parent_path(), ["inner".to_string()]);
        assert!(!diff.is_top_level());
    }

    #[test]
    fn test_top_level_parent_is_empty() {
        let diff = Difference::new("Left value null", Value::Null, Value::from(1), Vec::new());
        assert!(diff.is_top_level());
        assert!(diff.parent_path().is_empty());
        assert_eq!(diff.field_path_string(), "");
    }
}
