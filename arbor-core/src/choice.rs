//! Weighted choice among alternative arbitraries.

use crate::arbitrary::Arbitrary;
use crate::error::{ArborError, Result};
use crate::random::Random;
use crate::shrinkable::Shrinkable;

/// One branch of a weighted choice.
pub struct WeightedArbitrary<T: Clone + 'static> {
    pub arbitrary: Arbitrary<T>,
    /// Relative selection weight; must be at least 1.
    pub weight: u64,
}

/// Extra configuration for weighted choice construction. Currently empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceOptions;

/// Build a producer that, per generation, selects one branch with probability
/// proportional to its weight and delegates to it fully, shrinks included.
///
/// Branch order is significant: the roll is matched against entries in the
/// order given. `label` only appears in diagnostics.
///
/// Fails fast with [`ArborError::EmptyChoice`] when no branch is supplied and
/// with [`ArborError::InvalidWeight`] when any weight is zero.
pub fn frequency<T: Clone + 'static>(
    weighted: Vec<WeightedArbitrary<T>>,
    _options: ChoiceOptions,
    label: &str,
) -> Result<Arbitrary<T>> {
    if weighted.is_empty() {
        return Err(ArborError::EmptyChoice {
            label: label.to_string(),
        });
    }
    if weighted.iter().any(|entry| entry.weight == 0) {
        return Err(ArborError::InvalidWeight {
            label: label.to_string(),
        });
    }
    let total: u64 = weighted.iter().map(|entry| entry.weight).sum();
    Ok(Arbitrary::new(move |rng: &mut Random| -> Shrinkable<T> {
        let mut roll = rng.next_bounded(total);
        for entry in &weighted {
            if roll < entry.weight {
                return entry.arbitrary.generate(rng);
            }
            roll -= entry.weight;
        }
        // next_bounded(total) < total, so some branch always matches.
        unreachable!("roll exceeded the weight total")
    }))
}

/// Pick one of the given arbitraries, all equiprobable.
///
/// Expects at least one arbitrary; this entry point performs no validation of
/// its own, so violating the contract panics through the underlying weighted
/// choice.
pub fn one_of<T: Clone + 'static>(arbitraries: Vec<Arbitrary<T>>) -> Arbitrary<T> {
    let weighted = arbitraries
        .into_iter()
        .map(|arbitrary| WeightedArbitrary {
            arbitrary,
            weight: 1,
        })
        .collect();
    match frequency(weighted, ChoiceOptions::default(), "one_of") {
        Ok(arbitrary) => arbitrary,
        Err(err) => panic!("{err}"),
    }
}
