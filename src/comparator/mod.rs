//! Structural comparison of value graphs.
//!
//! A [`ComparatorChain`] is an ordered list of [`Comparator`] strategies. For
//! every pair of values the first comparator whose
//! [`can_compare`](Comparator::can_compare) accepts the pair decides the
//! outcome, recursing through the shared [`Comparison`] context for nested
//! values. The standard chain is
//!
//! ```text
//! number -> simple cases -> collection -> map -> object
//! ```
//!
//! and each comparison mode adds or substitutes a comparator, see
//! [`build_chain`].
//!
//! # Example
//!
//! ```
//! use reflect_assert::comparator::{ComparatorMode, ModeSet, ReflectionComparator};
//! use reflect_assert::value::Value;
//!
//! let strict = ReflectionComparator::strict();
//! let diff = strict
//!     .get_difference(&Value::list([1, 2, 3]), &Value::list([1, 99, 3]))
//!     .unwrap()
//!     .expect("lists differ");
//! assert_eq!(diff.field_path_string(), "1");
//!
//! let lenient = ReflectionComparator::new(ModeSet::from_iter([ComparatorMode::LenientOrder]));
//! assert!(lenient.is_equal(&Value::list([1, 2, 3]), &Value::list([3, 1, 2])).unwrap());
//! ```

mod collection;
mod difference;
mod factory;
mod lenient;
mod map;
mod object;
mod simple;
mod traversal;

pub use collection::{CollectionComparator, LenientOrderCollectionComparator};
pub use difference::Difference;
pub use factory::{
    build_chain, global, strict_chain, ComparatorChainFactory, ComparatorMode, ModeSet,
};
pub use lenient::{IgnoreDefaultsComparator, LenientDatesComparator};
pub use map::MapComparator;
pub use object::ObjectComparator;
pub use simple::{NumberComparator, SimpleCasesComparator};
pub use traversal::{Comparison, TraversedInstancePairs};

use crate::error::Result;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Comparator trait
// ============================================================================

/// One strategy of a comparator chain.
///
/// Implementations are stateless; all traversal state lives in the
/// [`Comparison`] passed to [`compare`](Self::compare).
pub trait Comparator: Send + Sync {
    /// Short name used in logs and chain listings.
    fn name(&self) -> &'static str;

    /// Whether this comparator takes responsibility for the pair.
    fn can_compare(&self, left: &Value, right: &Value) -> bool;

    /// Compare the pair, recursing through `comparison` for nested values.
    ///
    /// Returns `Ok(None)` when the values are equal.
    fn compare(
        &self,
        left: &Value,
        right: &Value,
        comparison: &mut Comparison<'_>,
    ) -> Result<Option<Difference>>;
}

// ============================================================================
// Comparator chain
// ============================================================================

/// An immutable, ordered list of comparators.
pub struct ComparatorChain {
    comparators: Vec<Box<dyn Comparator>>,
}

impl ComparatorChain {
    #[must_use]
    pub fn new(comparators: Vec<Box<dyn Comparator>>) -> Self {
        Self { comparators }
    }

    pub fn builder() -> ComparatorChainBuilder {
        ComparatorChainBuilder::default()
    }

    /// Names of the comparators, in dispatch order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.comparators.iter().map(|c| c.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// The first comparator accepting the pair.
    #[must_use]
    pub fn comparator_for(&self, left: &Value, right: &Value) -> Option<&dyn Comparator> {
        self.comparators
            .iter()
            .find(|c| c.can_compare(left, right))
            .map(|c| &**c)
    }

    /// Compare two graphs from scratch.
    pub fn get_difference(&self, left: &Value, right: &Value) -> Result<Option<Difference>> {
        let difference = Comparison::new(self).compare(left, right)?;
        if let Some(diff) = &difference {
            debug!(
                path = %diff.field_path_string(),
                message = diff.message(),
                "difference found"
            );
        }
        Ok(difference)
    }

    pub fn is_equal(&self, left: &Value, right: &Value) -> Result<bool> {
        Ok(self.get_difference(left, right)?.is_none())
    }
}

impl fmt::Debug for ComparatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builder for custom chains.
///
/// Chains without a catch-all comparator are allowed; comparing a pair that
/// nothing accepts then fails with
/// [`ReflectionError::NoComparator`](crate::error::ReflectionError::NoComparator).
#[derive(Default)]
#[must_use]
pub struct ComparatorChainBuilder {
    comparators: Vec<Box<dyn Comparator>>,
}

impl ComparatorChainBuilder {
    /// Append a comparator.
    pub fn with(mut self, comparator: impl Comparator + 'static) -> Self {
        self.comparators.push(Box::new(comparator));
        self
    }

    /// Append an already boxed comparator.
    pub fn with_boxed(mut self, comparator: Box<dyn Comparator>) -> Self {
        self.comparators.push(comparator);
        self
    }

    #[must_use]
    pub fn build(self) -> ComparatorChain {
        ComparatorChain::new(self.comparators)
    }
}

// ============================================================================
// Root entry point
// ============================================================================

/// Entry point for deep comparisons under a set of modes.
#[derive(Debug, Clone)]
pub struct ReflectionComparator {
    chain: Arc<ComparatorChain>,
}

impl ReflectionComparator {
    /// Comparator using the globally registered chain for `modes`.
    #[must_use]
    pub fn new(modes: ModeSet) -> Self {
        Self {
            chain: global().get_or_build(modes),
        }
    }

    #[must_use]
    pub fn strict() -> Self {
        Self::new(ModeSet::strict())
    }

    /// Lenient order and ignored defaults.
    #[must_use]
    pub fn lenient() -> Self {
        Self::new(ModeSet::lenient())
    }

    #[must_use]
    pub const fn with_chain(chain: Arc<ComparatorChain>) -> Self {
        Self { chain }
    }

    #[must_use]
    pub fn chain(&self) -> &Arc<ComparatorChain> {
        &self.chain
    }

    pub fn is_equal(&self, left: &Value, right: &Value) -> Result<bool> {
        self.chain.is_equal(left, right)
    }

    pub fn get_difference(&self, left: &Value, right: &Value) -> Result<Option<Difference>> {
        self.chain.get_difference(left, right)
    }
}

impl Default for ReflectionComparator {
    fn default() -> Self {
        Self::strict()
    }
}
