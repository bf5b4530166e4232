//! Conversion of Rust values into the reflectable value model.

use super::{ObjectRef, Value};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Types that can present themselves as a [`Value`] graph.
///
/// Implement this for your own types by describing the class once and
/// filling an [`ObjectRef`]:
///
/// ```
/// use std::sync::{Arc, LazyLock};
/// use reflect_assert::value::{ClassDescriptor, ObjectRef, Reflect, Value};
///
/// struct Point { x: i32, y: i32 }
///
/// static POINT: LazyLock<Arc<ClassDescriptor>> =
///     LazyLock::new(|| ClassDescriptor::builder("Point").field("x").field("y").build());
///
/// impl Reflect for Point {
///     fn reflect(&self) -> Value {
///         let object = ObjectRef::new(&POINT);
///         object.set("x", self.x).expect("declared");
///         object.set("y", self.y).expect("declared");
///         object.into()
///     }
/// }
///
/// assert_eq!(Point { x: 1, y: 2 }.reflect().to_string(), "Point<x=1, y=2>");
/// ```
pub trait Reflect {
    fn reflect(&self) -> Value;
}

macro_rules! reflect_via_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

reflect_via_from!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize, bool, char
);

impl Reflect for str {
    fn reflect(&self) -> Value {
        Value::from(self)
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl Reflect for DateTime<Utc> {
    fn reflect(&self) -> Value {
        Value::Date(*self)
    }
}

impl Reflect for NaiveDate {
    fn reflect(&self) -> Value {
        Value::Date(self.and_time(NaiveTime::MIN).and_utc())
    }
}

impl Reflect for Value {
    fn reflect(&self) -> Value {
        self.clone()
    }
}

impl Reflect for ObjectRef {
    fn reflect(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value {
        self.as_ref().map_or(Value::Null, Reflect::reflect)
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value {
        Value::array(self.iter().map(Reflect::reflect))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value {
        Value::array(self.iter().map(Reflect::reflect))
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value {
        Value::list(self.iter().map(Reflect::reflect))
    }
}

impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn reflect(&self) -> Value {
        Value::set(self.iter().map(Reflect::reflect))
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn reflect(&self) -> Value {
        Value::set(self.iter().map(Reflect::reflect))
    }
}

impl<T: Reflect, S> Reflect for IndexSet<T, S> {
    fn reflect(&self) -> Value {
        Value::set(self.iter().map(Reflect::reflect))
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.reflect(), v.reflect())))
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.reflect(), v.reflect())))
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for IndexMap<K, V, S> {
    fn reflect(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.reflect(), v.reflect())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SeqKind;

    #[test]
    fn test_vec_becomes_list() {
        let value = vec![1, 2, 3].reflect();
        match value {
            Value::Seq(seq) => {
                assert_eq!(seq.kind(), SeqKind::List);
                assert_eq!(seq.len(), 3);
            }
            other => panic!("expected a sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_array_and_slice_become_arrays() {
        let fixed = [1_u8, 2].reflect();
        let slice: &[u8] = &[1, 2];
        assert!(matches!(fixed, Value::Seq(ref s) if s.kind() == SeqKind::Array));
        assert!(matches!(slice.reflect(), Value::Seq(ref s) if s.kind() == SeqKind::Array));
    }

    #[test]
    fn test_option_and_reference() {
        assert!(None::<String>.reflect().is_null());
        let name = String::from("ada");
        assert!((&name).reflect().is_same(&Value::from("ada")));
    }

    #[test]
    fn test_naive_date_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
        match date.reflect() {
            Value::Date(dt) => assert_eq!(dt.to_rfc3339(), "2024-02-29T00:00:00+00:00"),
            other => panic!("expected a date, got {other:?}"),
        }
    }

    #[test]
    fn test_btree_map_entries() {
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        match map.reflect() {
            Value::Map(m) => assert_eq!(m.len(), 2),
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn test_value_reflect_keeps_identity() {
        let list = Value::list([1]);
        assert!(list.reflect().same_ref(&list));
    }
}
