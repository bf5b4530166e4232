//! Human-readable rendering of values and differences.
//!
//! ```text
//! null  "text"  'c'  42  1.5  2024-01-01T00:00:00Z  RED
//! [1, 2, ...]  {"a"=1, ...}  Person<name="ada", friend=Person<...>>
//! ```

use crate::comparator::Difference;
use crate::value::{ObjectRef, Value};
use chrono::SecondsFormat;
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_MAX_ELEMENTS: usize = 15;

/// Renders values with bounded depth and width.
///
/// Objects nested deeper than `max_depth` and objects already being
/// rendered further up (cycles) are shown as `Name<...>`. Sequences and
/// maps show at most `max_elements` entries followed by `...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormatter {
    pub max_depth: usize,
    pub max_elements: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl ValueFormatter {
    #[must_use]
    pub const fn new(max_depth: usize, max_elements: usize) -> Self {
        Self {
            max_depth,
            max_elements,
        }
    }

    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        let mut out = String::new();
        let mut active = HashSet::new();
        self.write(value, 0, &mut active, &mut out);
        out
    }

    fn write(&self, value: &Value, depth: usize, active: &mut HashSet<usize>, out: &mut String) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Char(c) => {
                out.push('\'');
                out.push(*c);
                out.push('\'');
            }
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::String(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            Value::Date(d) => out.push_str(&d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Enum(e) => out.push_str(&e.variant),
            Value::Seq(seq) => {
                if !active.insert(seq.id()) {
                    out.push_str("[...]");
                    return;
                }
                let items = seq.snapshot().unwrap_or_default();
                out.push('[');
                for (index, item) in items.iter().take(self.max_elements).enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    self.write(item, depth + 1, active, out);
                }
                if items.len() > self.max_elements {
                    out.push_str(", ...");
                }
                out.push(']');
                active.remove(&seq.id());
            }
            Value::Map(map) => {
                if !active.insert(map.id()) {
                    out.push_str("{...}");
                    return;
                }
                let entries = map.snapshot().unwrap_or_default();
                out.push('{');
                for (index, (key, value)) in entries.iter().take(self.max_elements).enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    self.write(key, depth, active, out);
                    out.push('=');
                    self.write(value, depth + 1, active, out);
                }
                if entries.len() > self.max_elements {
                    out.push_str(", ...");
                }
                out.push('}');
                active.remove(&map.id());
            }
            Value::Object(object) => self.write_object(object, depth, active, out),
        }
    }

    fn write_object(
        &self,
        object: &ObjectRef,
        depth: usize,
        active: &mut HashSet<usize>,
        out: &mut String,
    ) {
        let class = object.class();
        out.push_str(class.simple_name());
        if depth >= self.max_depth || !active.insert(object.id()) {
            out.push_str("<...>");
            return;
        }
        out.push('<');
        let mut first = true;
        for slot in class.slots() {
            if !slot.field.is_compared() {
                continue;
            }
            if !first {
                out.push_str(", ");
            }
            first = false;
            out.push_str(slot.field.name());
            out.push('=');
            let value = object.read(&slot).unwrap_or_default();
            self.write(&value, depth + 1, active, out);
        }
        out.push('>');
        active.remove(&object.id());
    }
}

/// The assertion-failure text for a difference.
///
/// ```text
/// <optional caller message>
/// <difference message>
/// Field: <path> expected: <left> but was: <right>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DifferenceReport<'a> {
    difference: &'a Difference,
    message: Option<&'a str>,
    formatter: ValueFormatter,
}

impl<'a> DifferenceReport<'a> {
    #[must_use]
    pub fn new(difference: &'a Difference) -> Self {
        Self {
            difference,
            message: None,
            formatter: ValueFormatter::default(),
        }
    }

    /// Prefix the report with a caller-supplied line.
    #[must_use]
    pub const fn with_message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    #[must_use]
    pub const fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = formatter;
        self
    }
}

impl fmt::Display for DifferenceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.message.filter(|m| !m.is_empty()) {
            writeln!(f, "{message}")?;
        }
        let path = if self.difference.is_top_level() {
            "top-level".to_string()
        } else {
            self.difference.field_path_string()
        };
        write!(
            f,
            "{}\nField: <{}> expected: <{}> but was: <{}>",
            self.difference.message(),
            path,
            self.formatter.format(self.difference.left_value()),
            self.formatter.format(self.difference.right_value()),
        )
    }
}
