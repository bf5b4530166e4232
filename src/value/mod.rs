//! The reflectable value model.
//!
//! Every graph handed to the comparator is expressed as a [`Value`]. Scalars
//! are plain data without identity. Sequences, maps and objects are shared
//! handles: cloning a handle keeps its identity, and the handle address is
//! what the comparator uses to detect cycles.
//!
//! # Example
//!
//! ```
//! use reflect_assert::value::{ClassDescriptor, ObjectRef, Value};
//!
//! let person = ClassDescriptor::builder("Person").field("name").field("friend").build();
//! let alice = ObjectRef::new(&person);
//! alice.set("name", "alice").unwrap();
//! alice.set("friend", alice.clone()).unwrap(); // a cycle
//!
//! let value = Value::from(alice);
//! assert_eq!(value.type_name(), "Person");
//! ```

mod json;
mod number;
mod object;
mod reflect;

pub use json::{from_json, from_json_str, from_yaml, from_yaml_str, DocumentOptions};
pub use number::{same_double, Number};
pub use object::{
    ClassBuilder, ClassDescriptor, FieldDescriptor, FieldModifiers, FieldSlot, ObjectBuilder,
    ObjectRef,
};
pub use reflect::Reflect;

use crate::error::{ReflectionError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, RwLock};

/// A node of a reflectable object graph.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Enum(EnumValue),
    Seq(SeqRef),
    Map(MapRef),
    Object(ObjectRef),
}

impl Value {
    /// Build an array from anything convertible to values.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(SeqRef::new(SeqKind::Array, items.into_iter().map(Into::into).collect()))
    }

    /// Build a list from anything convertible to values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(SeqRef::new(SeqKind::List, items.into_iter().map(Into::into).collect()))
    }

    /// Build a set from anything convertible to values.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(SeqRef::new(SeqKind::Set, items.into_iter().map(Into::into).collect()))
    }

    /// Build a map from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Self>,
        V: Into<Self>,
    {
        let map = MapRef::new();
        for (key, value) in entries {
            if let Err(err) = map.insert(key, value) {
                tracing::warn!(error = %err, "dropping map entry");
            }
        }
        Self::Map(map)
    }

    /// Build an enum constant.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum(EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
        })
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Handle address for shared values, `None` for scalars.
    #[must_use]
    pub fn identity(&self) -> Option<usize> {
        match self {
            Self::Seq(seq) => Some(seq.id()),
            Self::Map(map) => Some(map.id()),
            Self::Object(object) => Some(object.id()),
            _ => None,
        }
    }

    /// True when both values are the very same shared instance.
    #[must_use]
    pub fn same_ref(&self, other: &Self) -> bool {
        match (self.identity(), other.identity()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Shallow sameness: identity for shared values, value equality for
    /// scalars (with `NaN` equal to itself).
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(l), Self::Number(r)) => {
                l.type_name() == r.type_name() && same_double(l.as_f64(), r.as_f64())
            }
            (Self::Seq(_) | Self::Map(_) | Self::Object(_), _) => self.same_ref(other),
            _ => self.scalar_eq(other),
        }
    }

    /// Equality of non-numeric scalars; false for every other pairing.
    #[must_use]
    pub fn scalar_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::Char(l), Self::Char(r)) => l == r,
            (Self::String(l), Self::String(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Enum(l), Self::Enum(r)) => l == r,
            _ => false,
        }
    }

    /// Numbers and characters, the values compared by numeric value.
    #[must_use]
    pub const fn is_numeric_like(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Char(_))
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.as_f64()),
            Self::Char(c) => Some(f64::from(u32::from(*c))),
            _ => None,
        }
    }

    /// Scalars compared with their own equality (booleans, strings, numbers
    /// and characters).
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Char(_) | Self::Number(_) | Self::String(_)
        )
    }

    /// True for the language default of the value's type: null, `false`,
    /// `'\0'` and numeric zero.
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Char(c) => *c == '\0',
            Self::Number(n) => n.is_zero(),
            _ => false,
        }
    }

    /// Human-readable type name used in messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Char(_) => "char".to_string(),
            Self::Number(n) => n.type_name().to_string(),
            Self::String(_) => "string".to_string(),
            Self::Date(_) => "date".to_string(),
            Self::Enum(e) => e.type_name.clone(),
            Self::Seq(seq) => seq.kind().name().to_string(),
            Self::Map(_) => "map".to_string(),
            Self::Object(object) => object.class().name().to_string(),
        }
    }

    /// The string form of a value when used as a map key in a field path.
    #[must_use]
    pub fn key_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Char(c) => c.to_string(),
            Self::Enum(e) => e.variant.clone(),
            _ => crate::format::ValueFormatter::default().format(self),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::ValueFormatter::default().format(self))
    }
}

/// An enum constant, compared by type and variant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_name: String,
    pub variant: String,
}

/// The flavor of a sequence. All flavors are compared element-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    Array,
    List,
    Set,
}

impl SeqKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::List => "list",
            Self::Set => "set",
        }
    }
}

struct SeqData {
    kind: SeqKind,
    items: RwLock<Vec<Value>>,
}

/// Shared handle to an ordered sequence of values.
#[derive(Clone)]
pub struct SeqRef(Arc<SeqData>);

impl SeqRef {
    #[must_use]
    pub fn new(kind: SeqKind, items: Vec<Value>) -> Self {
        Self(Arc::new(SeqData {
            kind,
            items: RwLock::new(items),
        }))
    }

    #[must_use]
    pub fn kind(&self) -> SeqKind {
        self.0.kind
    }

    #[must_use]
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Copy of the current elements.
    pub fn snapshot(&self) -> Result<Vec<Value>> {
        self.0
            .items
            .read()
            .map(|items| items.clone())
            .map_err(|_| ReflectionError::field_access(self.kind().name(), "elements", "lock poisoned"))
    }

    /// Append an element.
    pub fn push(&self, value: impl Into<Value>) -> Result<()> {
        self.0
            .items
            .write()
            .map(|mut items| items.push(value.into()))
            .map_err(|_| ReflectionError::field_access(self.kind().name(), "elements", "lock poisoned"))
    }

    /// Number of elements; zero when the lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.items.read().map(|items| items.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SeqRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}(len={})", self.kind().name(), self.id(), self.len())
    }
}

/// Shared handle to an insertion-ordered map.
#[derive(Clone)]
pub struct MapRef(Arc<RwLock<Vec<(Value, Value)>>>);

impl MapRef {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(Vec::new())))
    }

    #[must_use]
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Insert or replace the entry whose key strictly equals `key`.
    ///
    /// Keys follow strict comparison, so `1` and `1.0` or two separate
    /// `[1]` lists name the same entry. The first key is kept and the value
    /// is replaced.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        let position = self.position_of(&key)?;
        let mut entries = self
            .0
            .write()
            .map_err(|_| ReflectionError::field_access("map", "entries", "lock poisoned"))?;
        match position.and_then(|index| entries.get_mut(index)) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
        Ok(())
    }

    /// Index of the entry whose key strictly equals `key`.
    ///
    /// Runs on a snapshot so keys referring back to this map do not
    /// re-enter the lock.
    pub fn position_of(&self, key: &Value) -> Result<Option<usize>> {
        let keys = crate::comparator::strict_chain();
        for (index, (existing, _)) in self.snapshot()?.iter().enumerate() {
            if existing.is_same(key) || keys.is_equal(existing, key)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Copy of the current entries.
    pub fn snapshot(&self) -> Result<Vec<(Value, Value)>> {
        self.0
            .read()
            .map(|entries| entries.clone())
            .map_err(|_| ReflectionError::field_access("map", "entries", "lock poisoned"))
    }

    /// Number of entries; zero when the lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().map(|entries| entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MapRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map@{:#x}(len={})", self.id(), self.len())
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! value_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<SeqRef> for Value {
    fn from(value: SeqRef) -> Self {
        Self::Seq(value)
    }
}

impl From<MapRef> for Value {
    fn from(value: MapRef) -> Self {
        Self::Map(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<&ObjectRef> for Value {
    fn from(value: &ObjectRef) -> Self {
        Self::Object(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_have_no_identity() {
        assert_eq!(Value::from(1).identity(), None);
        assert_eq!(Value::from("a").identity(), None);
        assert_eq!(Value::Null.identity(), None);
    }

    #[test]
    fn test_clone_keeps_identity() {
        let list = Value::list([1, 2, 3]);
        let copy = list.clone();
        assert!(list.same_ref(&copy));
        assert!(!list.same_ref(&Value::list([1, 2, 3])));
    }

    #[test]
    fn test_defaults() {
        assert!(Value::Null.is_default());
        assert!(Value::from(false).is_default());
        assert!(Value::from('\0').is_default());
        assert!(Value::from(0_i64).is_default());
        assert!(Value::from(-0.0_f64).is_default());
        assert!(!Value::from("").is_default());
        assert!(!Value::from(1).is_default());
        assert!(!Value::list(Vec::<i32>::new()).is_default());
    }

    #[test]
    fn test_map_insert_replaces_same_key() {
        let map = MapRef::new();
        map.insert("a", 1).expect("insert");
        map.insert("a", 2).expect("replace");
        map.insert("b", 3).expect("insert");
        let entries = map.snapshot().expect("snapshot");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].1.is_same(&Value::from(2)));
    }

    #[test]
    fn test_map_keys_unique_by_strict_equality() {
        let map = MapRef::new();
        map.insert(1_i32, "a").expect("insert");
        map.insert(1.0_f64, "b").expect("replace");
        map.insert(Value::list([1]), "c").expect("insert");
        map.insert(Value::list([1]), "d").expect("replace");
        let entries = map.snapshot().expect("snapshot");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].0.is_same(&Value::from(1_i32)));
        assert!(entries[0].1.is_same(&Value::from("b")));
        assert!(entries[1].1.is_same(&Value::from("d")));
    }

    #[test]
    fn test_map_key_may_refer_to_its_map() {
        let map = MapRef::new();
        map.insert(map.clone(), 1).expect("insert");
        map.insert(map.clone(), 2).expect("replace");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_seq_push_builds_self_reference() {
        let seq = SeqRef::new(SeqKind::List, Vec::new());
        seq.push(seq.clone()).expect("push");
        let items = seq.snapshot().expect("snapshot");
        assert!(Value::from(seq.clone()).same_ref(&items[0]));
    }

    #[test]
    fn test_key_string() {
        assert_eq!(Value::from("id").key_string(), "id");
        assert_eq!(Value::from(7).key_string(), "7");
        assert_eq!(Value::enumeration("Color", "RED").key_string(), "RED");
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<i32>).is_null());
        assert!(Value::from(Some("x")).is_same(&Value::from("x")));
    }
}
