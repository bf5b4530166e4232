//! Bridge from JSON and YAML documents into the value model.
//!
//! Objects become maps, arrays become lists. Integers keep their width
//! (`i64`, or `u64` above `i64::MAX`), other numbers become `f64`.

use super::{MapRef, Value};
use crate::error::{ConversionErrorKind, ReflectionError, Result};
use chrono::{DateTime, Utc};

/// Options applied while converting a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentOptions {
    /// Turn strings holding an RFC 3339 timestamp into dates.
    pub parse_dates: bool,
}

impl DocumentOptions {
    #[must_use]
    pub const fn with_dates() -> Self {
        Self { parse_dates: true }
    }
}

/// Convert a parsed JSON document.
pub fn from_json(document: &serde_json::Value, options: &DocumentOptions) -> Result<Value> {
    Ok(match document {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => json_number(n)?,
        serde_json::Value::String(s) => string_value(s, options),
        serde_json::Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| from_json(item, options))
                .collect::<Result<Vec<_>>>()?;
            Value::list(items)
        }
        serde_json::Value::Object(fields) => {
            let map = MapRef::new();
            for (key, value) in fields {
                map.insert(key.as_str(), from_json(value, options)?)?;
            }
            Value::Map(map)
        }
    })
}

/// Parse and convert a JSON text.
pub fn from_json_str(text: &str, options: &DocumentOptions) -> Result<Value> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    from_json(&document, options)
}

/// Convert a parsed YAML document.
///
/// A scalar tagged as `!Type VARIANT` becomes an enum constant.
pub fn from_yaml(document: &serde_yaml::Value, options: &DocumentOptions) -> Result<Value> {
    Ok(match document {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => yaml_number(n)?,
        serde_yaml::Value::String(s) => string_value(s, options),
        serde_yaml::Value::Sequence(items) => {
            let items = items
                .iter()
                .map(|item| from_yaml(item, options))
                .collect::<Result<Vec<_>>>()?;
            Value::list(items)
        }
        serde_yaml::Value::Mapping(entries) => {
            let map = MapRef::new();
            for (key, value) in entries {
                map.insert(from_yaml(key, options)?, from_yaml(value, options)?)?;
            }
            Value::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => match &tagged.value {
            serde_yaml::Value::String(variant) => {
                let tag = tagged.tag.to_string();
                Value::enumeration(tag.trim_start_matches('!'), variant.as_str())
            }
            other => {
                return Err(ReflectionError::conversion(
                    format!("tag {}", tagged.tag),
                    ConversionErrorKind::Unsupported(format!("{other:?}")),
                ))
            }
        },
    })
}

/// Parse and convert a YAML text.
pub fn from_yaml_str(text: &str, options: &DocumentOptions) -> Result<Value> {
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    from_yaml(&document, options)
}

fn string_value(text: &str, options: &DocumentOptions) -> Value {
    if options.parse_dates {
        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Value::Date(date.with_timezone(&Utc));
        }
    }
    Value::from(text)
}

fn json_number(n: &serde_json::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else if let Some(f) = n.as_f64() {
        Ok(Value::from(f))
    } else {
        Err(ReflectionError::conversion(
            "JSON number",
            ConversionErrorKind::Unsupported(n.to_string()),
        ))
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else if let Some(f) = n.as_f64() {
        Ok(Value::from(f))
    } else {
        Err(ReflectionError::conversion(
            "YAML number",
            ConversionErrorKind::Unsupported(n.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object_becomes_map() {
        let value = from_json_str(r#"{"a": 1, "b": [true, null]}"#, &DocumentOptions::default())
            .expect("valid json");
        match value {
            Value::Map(map) => {
                let entries = map.snapshot().expect("entries");
                assert_eq!(entries.len(), 2);
                assert!(entries[0].0.is_same(&Value::from("a")));
                assert!(entries[0].1.is_same(&Value::from(1_i64)));
            }
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn test_dates_only_when_requested() {
        let text = r#""2024-01-01T10:00:00Z""#;
        let plain = from_json_str(text, &DocumentOptions::default()).expect("valid json");
        let dated = from_json_str(text, &DocumentOptions::with_dates()).expect("valid json");
        assert!(matches!(plain, Value::String(_)));
        assert!(matches!(dated, Value::Date(_)));
    }

    #[test]
    fn test_invalid_json_is_conversion_error() {
        let err = from_json_str("{", &DocumentOptions::default()).unwrap_err();
        assert!(matches!(err, ReflectionError::Conversion { .. }));
    }

    #[test]
    fn test_yaml_mapping_and_tag() {
        let value = from_yaml_str("color: !Color RED\nsize: 2.5\n", &DocumentOptions::default())
            .expect("valid yaml");
        let Value::Map(map) = value else {
            panic!("expected a map");
        };
        let entries = map.snapshot().expect("entries");
        assert!(matches!(
            &entries[0].1,
            Value::Enum(e) if e.type_name == "Color" && e.variant == "RED"
        ));
        assert!(entries[1].1.is_same(&Value::from(2.5_f64)));
    }
}
