//! Comparison modes and the chain registry.

use super::{
    CollectionComparator, ComparatorChain, IgnoreDefaultsComparator, LenientDatesComparator,
    LenientOrderCollectionComparator, MapComparator, NumberComparator, ObjectComparator,
    SimpleCasesComparator,
};
use clap::ValueEnum;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::debug;

/// A leniency switch for structural comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ComparatorMode {
    /// A left value holding its type's default is not compared
    IgnoreDefaults,
    /// Dates only need to be both set or both null
    LenientDates,
    /// Collections and arrays may list their elements in any order
    LenientOrder,
}

impl ComparatorMode {
    pub const ALL: [Self; 3] = [Self::IgnoreDefaults, Self::LenientDates, Self::LenientOrder];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IgnoreDefaults => "ignore-defaults",
            Self::LenientDates => "lenient-dates",
            Self::LenientOrder => "lenient-order",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::IgnoreDefaults => 0b001,
            Self::LenientDates => 0b010,
            Self::LenientOrder => 0b100,
        }
    }
}

impl fmt::Display for ComparatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unordered set of [`ComparatorMode`]s. The empty set is strict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModeSet(u8);

impl ModeSet {
    #[must_use]
    pub const fn strict() -> Self {
        Self(0)
    }

    /// Lenient order and ignored defaults, the usual "lenient equals".
    #[must_use]
    pub const fn lenient() -> Self {
        Self(ComparatorMode::IgnoreDefaults.bit() | ComparatorMode::LenientOrder.bit())
    }

    #[must_use]
    pub const fn with(self, mode: ComparatorMode) -> Self {
        Self(self.0 | mode.bit())
    }

    #[must_use]
    pub const fn contains(self, mode: ComparatorMode) -> bool {
        self.0 & mode.bit() != 0
    }

    #[must_use]
    pub const fn is_strict(self) -> bool {
        self.0 == 0
    }

    /// Modes in declaration order.
    pub fn modes(self) -> impl Iterator<Item = ComparatorMode> {
        ComparatorMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }

    /// All eight combinations, strict first.
    pub fn all_combinations() -> impl Iterator<Item = Self> {
        (0_u8..8).map(Self)
    }
}

impl FromIterator<ComparatorMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = ComparatorMode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::strict(), Self::with)
    }
}

impl<'a> FromIterator<&'a ComparatorMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = &'a ComparatorMode>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_strict() {
            return f.write_str("strict");
        }
        let names: Vec<&str> = self.modes().map(|mode| mode.name()).collect();
        f.write_str(&names.join("+"))
    }
}

/// Assemble the chain for a mode set.
///
/// Lenient dates comes first so that it overrides ignore defaults for
/// date pairs. Lenient order replaces the ordered collection comparator.
#[must_use]
pub fn build_chain(modes: ModeSet) -> ComparatorChain {
    let mut builder = ComparatorChain::builder();
    if modes.contains(ComparatorMode::LenientDates) {
        builder = builder.with(LenientDatesComparator);
    }
    if modes.contains(ComparatorMode::IgnoreDefaults) {
        builder = builder.with(IgnoreDefaultsComparator);
    }
    builder = builder.with(NumberComparator).with(SimpleCasesComparator);
    builder = if modes.contains(ComparatorMode::LenientOrder) {
        builder.with(LenientOrderCollectionComparator)
    } else {
        builder.with(CollectionComparator)
    };
    builder.with(MapComparator).with(ObjectComparator).build()
}

/// Registry of shared chains keyed by mode set.
pub struct ComparatorChainFactory {
    chains: RwLock<IndexMap<ModeSet, Arc<ComparatorChain>>>,
}

impl ComparatorChainFactory {
    /// A registry holding one chain for each of the eight mode combinations.
    #[must_use]
    pub fn standard() -> Self {
        let factory = Self::empty();
        for modes in ModeSet::all_combinations() {
            factory.register(modes, build_chain(modes));
        }
        factory
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            chains: RwLock::new(IndexMap::new()),
        }
    }

    /// Register (or replace) the chain used for `modes`.
    pub fn register(&self, modes: ModeSet, chain: ComparatorChain) -> Arc<ComparatorChain> {
        let chain = Arc::new(chain);
        debug!(modes = %modes, comparators = ?chain.names(), "registering comparator chain");
        self.chains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(modes, Arc::clone(&chain));
        chain
    }

    /// The chain registered for `modes`; `None` when nothing is registered.
    #[must_use]
    pub fn chain_for(&self, modes: ModeSet) -> Option<Arc<ComparatorChain>> {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&modes)
            .cloned()
    }

    /// The registered chain, building and registering one on a miss.
    #[must_use]
    pub fn get_or_build(&self, modes: ModeSet) -> Arc<ComparatorChain> {
        match self.chain_for(modes) {
            Some(chain) => chain,
            None => self.register(modes, build_chain(modes)),
        }
    }

    /// Registered mode sets, in registration order.
    #[must_use]
    pub fn registered(&self) -> Vec<ModeSet> {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }
}

impl Default for ComparatorChainFactory {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ComparatorChainFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorChainFactory")
            .field("registered", &self.registered())
            .finish()
    }
}

static GLOBAL_FACTORY: LazyLock<ComparatorChainFactory> =
    LazyLock::new(ComparatorChainFactory::standard);

/// The process-wide registry, pre-filled with all eight combinations.
#[must_use]
pub fn global() -> &'static ComparatorChainFactory {
    &GLOBAL_FACTORY
}

/// The shared strict chain, used among others for map key lookups.
#[must_use]
pub fn strict_chain() -> Arc<ComparatorChain> {
    global().get_or_build(ModeSet::strict())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_set_is_order_independent() {
        let a: ModeSet = [ComparatorMode::LenientOrder, ComparatorMode::IgnoreDefaults]
            .into_iter()
            .collect();
        let b: ModeSet = [ComparatorMode::IgnoreDefaults, ComparatorMode::LenientOrder]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_eq!(a, ModeSet::lenient());
        assert_eq!(a.to_string(), "ignore-defaults+lenient-order");
        assert_eq!(ModeSet::strict().to_string(), "strict");
    }

    #[test]
    fn test_register_recovers_poisoned_registry() {
        let factory = Arc::new(ComparatorChainFactory::empty());
        let poisoner = Arc::clone(&factory);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.chains.write().unwrap();
            panic!("poison the registry");
        })
        .join();
        assert!(factory.chains.is_poisoned());

        factory.register(ModeSet::lenient(), build_chain(ModeSet::lenient()));
        assert!(factory.chain_for(ModeSet::lenient()).is_some());
        assert_eq!(factory.registered(), vec![ModeSet::lenient()]);
    }

    #[test]
    fn test_chain_layouts() {
        assert_eq!(
            build_chain(ModeSet::strict()).names(),
            vec!["number", "simple-cases", "collection", "map", "object"]
        );
        let all: ModeSet = ComparatorMode::ALL.iter().collect();
        assert_eq!(
            build_chain(all).names(),
            vec![
                "lenient-dates",
                "ignore-defaults",
                "number",
                "simple-cases",
                "lenient-order-collection",
                "map",
                "object"
            ]
        );
    }

    #[test]
    fn test_standard_factory_has_all_combinations() {
        let factory = ComparatorChainFactory::standard();
        assert_eq!(factory.registered().len(), 8);
        for modes in ModeSet::all_combinations() {
            assert!(factory.chain_for(modes).is_some(), "missing {modes}");
        }
    }

    #[test]
    fn test_empty_factory_misses() {
        let factory = ComparatorChainFactory::empty();
        assert!(factory.chain_for(ModeSet::lenient()).is_none());
        let built = factory.get_or_build(ModeSet::lenient());
        let again = factory.chain_for(ModeSet::lenient()).expect("registered on miss");
        assert!(Arc::ptr_eq(&built, &again));
    }

    #[test]
    fn test_global_chains_are_shared() {
        assert!(Arc::ptr_eq(&strict_chain(), &strict_chain()));
    }
}
