//! Comparators for scalar values.

use super::{Comparator, Comparison, Difference};
use crate::error::Result;
use crate::value::{same_double, Value};

/// Numbers and characters, compared by their `f64` value.
///
/// `1` equals `1.0` and `'a'` equals `97`. `NaN` equals `NaN`, while `0.0`
/// and `-0.0` differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberComparator;

impl Comparator for NumberComparator {
    fn name(&self) -> &'static str {
        "number"
    }

    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        left.is_numeric_like() && right.is_numeric_like()
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        Ok(compare_numeric(left, right, comparison))
    }
}

fn compare_numeric(left: &Value, right: &Value, comparison: &Comparison<'_>) -> Option<Difference> {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) if same_double(l, r) => None,
        _ => Some(comparison.difference("Different primitive values", left, right)),
    }
}

/// Identical references, nulls, and values compared with their own equality.
///
/// Accepts a pair when both are the same instance, when either side is
/// null, when both are builtin scalars (booleans, characters, numbers,
/// strings), when both are enum constants, or when both are dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCasesComparator;

impl Comparator for SimpleCasesComparator {
    fn name(&self) -> &'static str {
        "simple-cases"
    }

    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        left.same_ref(right)
            || left.is_null()
            || right.is_null()
            || (left.is_builtin() && right.is_builtin())
            || matches!(
                (left, right),
                (Value::Enum(_), Value::Enum(_)) | (Value::Date(_), Value::Date(_))
            )
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        if left.same_ref(right) || (left.is_null() && right.is_null()) {
            return Ok(None);
        }
        if left.is_null() {
            return Ok(Some(comparison.difference("Left value null", left, right)));
        }
        if right.is_null() {
            return Ok(Some(comparison.difference("Right value null", left, right)));
        }
        if left.is_numeric_like() && right.is_numeric_like() {
            return Ok(compare_numeric(left, right, comparison));
        }
        if left.scalar_eq(right) {
            return Ok(None);
        }
        let message = match (left, right) {
            (Value::Enum(_), Value::Enum(_)) => "Different enum values",
            (Value::Date(_), Value::Date(_)) => "Different date values",
            _ => "Different object values",
        };
        Ok(Some(comparison.difference(message, left, right)))
    }
}
