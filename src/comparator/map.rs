//! Map comparator.

use super::{strict_chain, Comparator, Comparison, Difference};
use crate::error::Result;
use crate::value::Value;

/// Entry-wise map comparison.
///
/// Keys are matched with the strict chain on fresh state, whatever modes
/// the surrounding comparison uses; values are compared with the active
/// chain under the key's string form.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapComparator;

impl Comparator for MapComparator {
    fn name(&self) -> &'static str {
        "map"
    }

    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::Map(_), Value::Map(_)))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        let (Value::Map(l), Value::Map(r)) = (left, right) else {
            return Ok(None);
        };
        let left_entries = l.snapshot()?;
        let mut remaining = r.snapshot()?;
        if left_entries.len() != remaining.len() {
            let message = format!(
                "Different map sizes. Left size: {}, right size: {}",
                left_entries.len(),
                remaining.len()
            );
            return Ok(Some(comparison.difference(message, left, right)));
        }

        let keys = strict_chain();
        for (left_key, left_value) in &left_entries {
            let segment = left_key.key_string();
            let mut found = None;
            for (index, (right_key, _)) in remaining.iter().enumerate() {
                if keys.is_equal(left_key, right_key)? {
                    found = Some(index);
                    break;
                }
            }

            let Some(index) = found else {
                let message = format!("Left key not found in right map. Left key: {segment}");
                return Ok(Some(comparison.difference_at(
                    segment,
                    message,
                    left_value,
                    &Value::Null,
                )));
            };
            let (_, right_value) = remaining.remove(index);
            if let Some(diff) = comparison.compare_field(segment, left_value, &right_value)? {
                return Ok(Some(diff));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{build_chain, ComparatorMode, ModeSet};

    fn strict(left: &Value, right: &Value) -> Option<Difference> {
        build_chain(ModeSet::strict())
            .get_difference(left, right)
            .expect("comparable")
    }

    #[test]
    fn test_equal_maps_ignore_entry_order() {
        let left = Value::map([("a", 1), ("b", 2)]);
        let right = Value::map([("b", 2), ("a", 1)]);
        assert!(strict(&left, &right).is_none());
    }

    #[test]
    fn test_key_not_found() {
        let left = Value::map([("a", 1), ("b", 2)]);
        let right = Value::map([("a", 1), ("c", 2)]);
        let d = strict(&left, &right).expect("differs");
        assert_eq!(d.message(), "Left key not found in right map. Left key: b");
        assert_eq!(d.field_path_string(), "b");
        assert!(d.right_value().is_null());
    }

    #[test]
    fn test_value_difference_under_key() {
        let left = Value::map([("a", 1)]);
        let right = Value::map([("a", 2)]);
        let d = strict(&left, &right).expect("differs");
        assert_eq!(d.field_path_string(), "a");
        assert_eq!(d.message(), "Different primitive values");
    }

    #[test]
    fn test_size_mismatch() {
        let d = strict(&Value::map([("a", 1)]), &Value::map([("a", 1), ("b", 2)]))
            .expect("differs");
        assert_eq!(d.message(), "Different map sizes. Left size: 1, right size: 2");
        assert!(d.is_top_level());
    }

    #[test]
    fn test_keys_stay_strict_under_lenient_order() {
        let chain = build_chain(ModeSet::from_iter([ComparatorMode::LenientOrder]));
        let left = Value::map([(Value::list([1, 2]), "x")]);
        let right = Value::map([(Value::list([2, 1]), "x")]);
        let d = chain.get_difference(&left, &right).expect("comparable");
        assert!(d.is_some_and(|d| d.message().starts_with("Left key not found")));
    }

    #[test]
    fn test_keys_stay_strict_under_ignore_defaults() {
        let chain = build_chain(ModeSet::from_iter([ComparatorMode::IgnoreDefaults]));
        let left = Value::map([(Value::Null, 1)]);
        let right = Value::map([("k", 1)]);
        assert!(chain.get_difference(&left, &right).expect("comparable").is_some());
    }
}
