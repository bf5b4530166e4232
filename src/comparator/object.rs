//! The catch-all comparator.

use super::{Comparator, Comparison, Difference};
use crate::error::{ReflectionError, Result};
use crate::value::Value;

/// Field-by-field comparison of objects of the same class.
///
/// Accepts every pair, so it must be the last member of a chain. Pairs of
/// anything other than two objects reach it only when no specialised
/// comparator understood them, and are reported as different classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectComparator;

impl Comparator for ObjectComparator {
    fn name(&self) -> &'static str {
        "object"
    }

    fn can_compare(&self, _left: &Value, _right: &Value) -> bool {
        true
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        let (Value::Object(l), Value::Object(r)) = (left, right) else {
            return Ok(Some(different_classes(left, right, comparison)));
        };
        if l.class().name() != r.class().name() {
            return Ok(Some(different_classes(left, right, comparison)));
        }
        if !l.class().is_same_class(r.class()) {
            return Err(ReflectionError::field_access(
                l.class().name(),
                "*",
                "two class descriptors with this name declare different fields",
            ));
        }

        for slot in l.class().slots() {
            if !slot.field.is_compared() {
                continue;
            }
            let left_value = l.read(&slot)?;
            let right_value = r.read(&slot)?;
            if let Some(diff) =
                comparison.compare_field(slot.field.name(), &left_value, &right_value)?
            {
                return Ok(Some(diff));
            }
        }
        Ok(None)
    }
}

fn different_classes(left: &Value, right: &Value, comparison: &Comparison<'_>) -> Difference {
    let message = format!(
        "Different classes. Left: {}, right: {}",
        left.type_name(),
        right.type_name()
    );
    comparison.difference(message, left, right)
}
