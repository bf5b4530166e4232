//! Per-call traversal state: the field path and the visited instance pairs.

use super::{ComparatorChain, Difference};
use crate::error::{ReflectionError, Result};
use crate::value::Value;
use std::collections::HashSet;
use tracing::trace;

/// Identity pairs `(left, right)` already entered during one comparison.
///
/// Only values with identity (sequences, maps, objects) are ever tracked.
/// A pair is never removed once added, which is what breaks cycles.
#[derive(Debug, Clone, Default)]
pub struct TraversedInstancePairs {
    pairs: HashSet<(usize, usize)>,
}

impl TraversedInstancePairs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, left: &Value, right: &Value) -> bool {
        Self::key(left, right).is_some_and(|key| self.pairs.contains(&key))
    }

    /// Record the pair; returns false for scalars and already known pairs.
    pub fn register(&mut self, left: &Value, right: &Value) -> bool {
        match Self::key(left, right) {
            Some(key) => self.pairs.insert(key),
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn key(left: &Value, right: &Value) -> Option<(usize, usize)> {
        Some((left.identity()?, right.identity()?))
    }
}

/// Traversal context threaded through every comparator of a chain.
pub struct Comparison<'c> {
    chain: &'c ComparatorChain,
    path: Vec<String>,
    visited: TraversedInstancePairs,
}

impl<'c> Comparison<'c> {
    /// Fresh state: empty field path, nothing visited.
    #[must_use]
    pub fn new(chain: &'c ComparatorChain) -> Self {
        Self {
            chain,
            path: Vec::new(),
            visited: TraversedInstancePairs::new(),
        }
    }

    #[must_use]
    pub const fn chain(&self) -> &'c ComparatorChain {
        self.chain
    }

    /// Current field path, outermost segment first.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub const fn visited(&self) -> &TraversedInstancePairs {
        &self.visited
    }

    /// The recursive step: dispatch the pair to the first comparator that
    /// accepts it.
    pub fn compare(&mut self, left: &Value, right: &Value) -> Result<Option<Difference>> {
        if self.visited.contains(left, right) {
            trace!(path = %self.path.join("."), "pair already traversed");
            return Ok(None);
        }

        let comparator = self
            .chain
            .comparator_for(left, right)
            .ok_or_else(|| ReflectionError::no_comparator(left, right, &self.path))?;

        self.visited.register(left, right);
        trace!(
            comparator = comparator.name(),
            path = %self.path.join("."),
            "comparing"
        );
        comparator.compare(left, right, self)
    }

    /// Compare a nested pair with `segment` pushed on the field path.
    pub fn compare_field(
        &mut self,
        segment: impl Into<String>,
        left: &Value,
        right: &Value,
    ) -> Result<Option<Difference>> {
        self.path.push(segment.into());
        let result = self.compare(left, right);
        self.path.pop();
        result
    }

    /// A difference at the current path.
    #[must_use]
    pub fn difference(&self, message: impl Into<String>, left: &Value, right: &Value) -> Difference {
        Difference::new(message, left.clone(), right.clone(), self.path.clone())
    }

    /// A difference one segment below the current path.
    #[must_use]
    pub fn difference_at(
        &self,
        segment: impl Into<String>,
        message: impl Into<String>,
        left: &Value,
        right: &Value,
    ) -> Difference {
        let mut path = self.path.clone();
        path.push(segment.into());
        Difference::new(message, left.clone(), right.clone(), path)
    }

    /// Try a candidate match without disturbing the traversal.
    ///
    /// The comparison runs on a copy of the visited pairs, which is adopted
    /// only when the values turn out equal. A failed attempt therefore never
    /// hides a later comparison of the same instances.
    pub fn trial_equal(&mut self, left: &Value, right: &Value) -> Result<bool> {
        let mut trial = Comparison {
            chain: self.chain,
            path: self.path.clone(),
            visited: self.visited.clone(),
        };
        let equal = trial.compare(left, right)?.is_none();
        if equal {
            self.visited = trial.visited;
        }
        Ok(equal)
    }
}
