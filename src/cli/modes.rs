//! Modes command handler.
//!
//! Lists every registered mode combination with the comparators its chain
//! consults, in order.

use crate::comparator::{global, ComparatorChainFactory};
use anyhow::Result;
use std::fmt::Write as _;

/// Render the registered chains of `factory`, one line per mode set.
#[must_use]
pub fn describe_chains(factory: &ComparatorChainFactory) -> String {
    let mut out = String::new();
    for modes in factory.registered() {
        if let Some(chain) = factory.chain_for(modes) {
            let label = modes.to_string();
            let _ = writeln!(out, "{label:<40} {}", chain.names().join(" -> "));
        }
    }
    out
}

/// Run the modes command.
pub fn run_modes() -> Result<()> {
    print!("{}", describe_chains(global()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_standard_chains() {
        let listing = describe_chains(&ComparatorChainFactory::standard());
        assert_eq!(listing.lines().count(), 8);
        let strict = listing
            .lines()
            .find(|line| line.starts_with("strict "))
            .unwrap();
        assert!(strict.ends_with("number -> simple-cases -> collection -> map -> object"));
        assert!(listing.contains("lenient-order-collection"));
    }

    #[test]
    fn test_describe_empty_factory() {
        assert!(describe_chains(&ComparatorChainFactory::empty()).is_empty());
    }
}
