//! Bean-style property paths such as `orders[2].lines.price`.
//!
//! A path is a dot-separated list of names, each optionally followed by
//! `[index]` selectors. Names address object fields or map keys (by the
//! key's string form); indices address elements of arrays, lists and sets.

use crate::error::{PropertyErrorKind, ReflectionError, Result};
use crate::value::Value;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SEGMENT: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^([^.\[\]]*)((?:\[\d+\])*)$"));

static INDEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]"));

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyStep {
    Name(String),
    Index(usize),
}

/// A parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    source: String,
    steps: Vec<PropertyStep>,
}

impl PropertyPath {
    /// Parse `a.b[2].c`.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: String| {
            ReflectionError::property(path, "parsing", PropertyErrorKind::InvalidSyntax(reason))
        };
        let segment_re = SEGMENT.as_ref().map_err(|e| invalid(e.to_string()))?;
        let index_re = INDEX.as_ref().map_err(|e| invalid(e.to_string()))?;

        if path.trim().is_empty() {
            return Err(invalid("empty path".to_string()));
        }

        let mut steps = Vec::new();
        for (position, segment) in path.split('.').enumerate() {
            let captures = segment_re
                .captures(segment)
                .ok_or_else(|| invalid(format!("malformed segment '{segment}'")))?;
            let name = captures.get(1).map_or("", |m| m.as_str());
            let selectors = captures.get(2).map_or("", |m| m.as_str());

            if name.is_empty() && (position > 0 || selectors.is_empty()) {
                return Err(invalid(format!("empty name in segment {}", position + 1)));
            }
            if !name.is_empty() {
                steps.push(PropertyStep::Name(name.to_string()));
            }
            for index in index_re.captures_iter(selectors) {
                let digits = index.get(1).map_or("", |m| m.as_str());
                let index = digits
                    .parse::<usize>()
                    .map_err(|e| invalid(format!("index '{digits}': {e}")))?;
                steps.push(PropertyStep::Index(index));
            }
        }

        Ok(Self {
            source: path.to_string(),
            steps,
        })
    }

    #[must_use]
    pub fn steps(&self) -> &[PropertyStep] {
        &self.steps
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Follow the path from `root`.
    pub fn resolve(&self, root: &Value) -> Result<Value> {
        let mut current = root.clone();
        let mut walked = String::new();
        for step in &self.steps {
            let fail = |kind| ReflectionError::property(&self.source, format!("at '{walked}'"), kind);
            if current.is_null() {
                return Err(fail(PropertyErrorKind::NullValue(walked.clone())));
            }
            current = match step {
                PropertyStep::Name(name) => match &current {
                    Value::Object(object) => {
                        let class = object.class();
                        if class.slot_of(name).is_none() {
                            let candidates = class.compared_field_names();
                            return Err(fail(PropertyErrorKind::UnknownProperty {
                                name: name.clone(),
                                owner: class.name().to_string(),
                                hint: suggestion(name, candidates.iter().copied()),
                            }));
                        }
                        object.get(name)?
                    }
                    Value::Map(map) => {
                        let entries = map.snapshot()?;
                        match entries.iter().find(|(key, _)| key.key_string() == *name) {
                            Some((_, value)) => value.clone(),
                            None => {
                                let keys: Vec<String> =
                                    entries.iter().map(|(key, _)| key.key_string()).collect();
                                return Err(fail(PropertyErrorKind::UnknownProperty {
                                    name: name.clone(),
                                    owner: "map".to_string(),
                                    hint: suggestion(name, keys.iter().map(String::as_str)),
                                }));
                            }
                        }
                    }
                    other => return Err(fail(PropertyErrorKind::NotNavigable(other.type_name()))),
                },
                PropertyStep::Index(index) => match &current {
                    Value::Seq(seq) => {
                        let items = seq.snapshot()?;
                        let size = items.len();
                        items.into_iter().nth(*index).ok_or_else(|| {
                            fail(PropertyErrorKind::IndexOutOfBounds {
                                index: *index,
                                size,
                            })
                        })?
                    }
                    other => return Err(fail(PropertyErrorKind::NotNavigable(other.type_name()))),
                },
            };
            match step {
                PropertyStep::Name(name) if walked.is_empty() => walked.push_str(name),
                PropertyStep::Name(name) => {
                    walked.push('.');
                    walked.push_str(name);
                }
                PropertyStep::Index(index) => walked.push_str(&format!("[{index}]")),
            }
        }
        Ok(current)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Resolve `path` on `root` in one go.
pub fn resolve_property(root: &Value, path: &str) -> Result<Value> {
    PropertyPath::parse(path)?.resolve(root)
}

fn suggestion<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> String {
    candidates
        .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| format!(" (did you mean '{candidate}'?)"))
        .unwrap_or_default()
}
