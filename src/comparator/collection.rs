//! Comparators for arrays, lists and sets.

use super::{Comparator, Comparison, Difference};
use crate::error::Result;
use crate::format::ValueFormatter;
use crate::value::{SeqKind, SeqRef, Value};

fn as_seqs<'v>(left: &'v Value, right: &'v Value) -> Option<(&'v SeqRef, &'v SeqRef)> {
    match (left, right) {
        (Value::Seq(l), Value::Seq(r)) => Some((l, r)),
        _ => None,
    }
}

fn size_difference(
    left: &Value,
    right: &Value,
    left_len: usize,
    right_len: usize,
    comparison: &Comparison<'_>,
) -> Difference {
    let both_arrays = matches!(
        (left, right),
        (Value::Seq(l), Value::Seq(r)) if l.kind() == SeqKind::Array && r.kind() == SeqKind::Array
    );
    let message = if both_arrays {
        format!("Different array lengths. Left length: {left_len}, right length: {right_len}")
    } else {
        format!("Different collection sizes. Left size: {left_len}, right size: {right_len}")
    };
    comparison.difference(message, left, right)
}

/// Element-wise, order-sensitive comparison.
///
/// A size mismatch is reported on the collections themselves; otherwise
/// each index is compared with the index pushed on the field path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionComparator;

impl Comparator for CollectionComparator {
    fn name(&self) -> &'static str {
        "collection"
    }

    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        as_seqs(left, right).is_some()
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        let Some((l, r)) = as_seqs(left, right) else {
            return Ok(None);
        };
        let left_items = l.snapshot()?;
        let right_items = r.snapshot()?;
        if left_items.len() != right_items.len() {
            return Ok(Some(size_difference(
                left,
                right,
                left_items.len(),
                right_items.len(),
                comparison,
            )));
        }

        for (index, (l, r)) in left_items.iter().zip(&right_items).enumerate() {
            if let Some(diff) = comparison.compare_field(index.to_string(), l, r)? {
                return Ok(Some(diff));
            }
        }
        Ok(None)
    }
}

/// Order-insensitive comparison.
///
/// Every left element must match a distinct, not yet matched right element.
/// Candidates are tried with the active chain, so nested leniency still
/// applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientOrderCollectionComparator;

impl Comparator for LenientOrderCollectionComparator {
    fn name(&self) -> &'static str {
        "lenient-order-collection"
    }

    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        as_seqs(left, right).is_some()
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>> {
        let Some((l, r)) = as_seqs(left, right) else {
            return Ok(None);
        };
        let left_items = l.snapshot()?;
        let mut remaining = r.snapshot()?;
        if left_items.len() != remaining.len() {
            return Ok(Some(size_difference(
                left,
                right,
                left_items.len(),
                remaining.len(),
                comparison,
            )));
        }

        for item in &left_items {
            let mut found = None;
            for (index, candidate) in remaining.iter().enumerate() {
                if comparison.trial_equal(item, candidate)? {
                    found = Some(index);
                    break;
                }
            }
            match found {
                Some(index) => {
                    remaining.remove(index);
                }
                None => {
                    let message = format!(
                        "Left value not found in right collection/array. Left value: {}",
                        ValueFormatter::default().format(item)
                    );
                    return Ok(Some(comparison.difference(message, left, right)));
                }
            }
        }
        Ok(None)
    }
}
