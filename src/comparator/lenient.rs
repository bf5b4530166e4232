//! Comparators added to a chain by the lenient comparison modes.

use super::{Comparator, Comparison, Difference};
use crate::error::Result;
use crate::value::Value;

/// Treats a left value holding its type's default (null, `false`, `'\0'`,
/// zero) as "don't care".
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreDefaultsComparator;

impl Comparator for IgnoreDefaultsComparator {
    fn name(&self) -> &'static str {
        "ignore-defaults"
    }

    fn can_compare(&self, left: &Value, _right: &Value) -> bool {
        left.is_default()
    }

    fn compare(
        &self,
        _left: &Value,
        _right: &Value,
        _comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        Ok(None)
    }
}

/// Dates are equal when both are set or both are null, whatever their value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientDatesComparator;

impl Comparator for LenientDatesComparator {
    fn name(&self) -> &'static str {
        "lenient-dates"
    }

    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        matches!(left, Value::Null | Value::Date(_)) && matches!(right, Value::Null | Value::Date(_))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        if left.is_null() == right.is_null() {
            return Ok(None);
        }
        Ok(Some(comparison.difference(
            "Lenient dates, but not both instantiated or both null",
            left,
            right,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{build_chain, ComparatorMode, ModeSet};
    use chrono::{TimeZone, Utc};

    fn date(day: u32) -> Value {
        Value::from(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_ignore_defaults_only_looks_left() {
        let chain = build_chain(ModeSet::from_iter([ComparatorMode::IgnoreDefaults]));
        assert!(chain.is_equal(&Value::Null, &Value::from("x")).expect("comparable"));
        assert!(chain.is_equal(&Value::from(0), &Value::from(5)).expect("comparable"));
        assert!(chain.is_equal(&Value::from(false), &Value::from(true)).expect("comparable"));
        assert!(!chain.is_equal(&Value::from("x"), &Value::Null).expect("comparable"));
    }

    #[test]
    fn test_lenient_dates() {
        let chain = build_chain(ModeSet::from_iter([ComparatorMode::LenientDates]));
        assert!(chain.is_equal(&date(1), &date(2)).expect("comparable"));
        assert!(chain.is_equal(&Value::Null, &Value::Null).expect("comparable"));

        let d = chain
            .get_difference(&Value::Null, &date(1))
            .expect("comparable")
            .expect("one side null");
        assert_eq!(
            d.message(),
            "Lenient dates, but not both instantiated or both null"
        );
    }

    #[test]
    fn test_lenient_dates_overrides_ignore_defaults() {
        let chain = build_chain(ModeSet::from_iter([
            ComparatorMode::LenientDates,
            ComparatorMode::IgnoreDefaults,
        ]));
        assert!(!chain.is_equal(&Value::Null, &date(1)).expect("comparable"));
        assert!(chain.is_equal(&Value::Null, &Value::from(3)).expect("comparable"));
    }

    #[test]
    fn test_strict_dates_differ() {
        let chain = build_chain(ModeSet::strict());
        assert!(!chain.is_equal(&date(1), &date(2)).expect("comparable"));
    }
}
