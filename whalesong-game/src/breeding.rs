//! Trait inheritance between two parents.
//!
//! Each unique trait is inherited with probability `(count_a + count_b) / 4`,
//! so a trait carried twice by one parent is twice as likely to pass on. When
//! the parents carry any traits at all, the offspring always receives at least
//! one.
use serde::{Deserialize, Serialize};

use crate::constants::INHERIT_CHANCE_DIVISOR;
use crate::numbers::count_to_f64;
use crate::rng::RandomSource;
use crate::whale::{TraitList, WhaleTrait, count_trait};

/// Raw inheritance odds for one trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitOdds {
    pub whale_trait: WhaleTrait,
    pub probability: f64,
}

/// Union of both parents' traits in first-seen order.
fn unique_traits(parent_a: &[WhaleTrait], parent_b: &[WhaleTrait]) -> TraitList {
    let mut unique = TraitList::new();
    for whale_trait in parent_a.iter().chain(parent_b) {
        if !unique.contains(whale_trait) {
            unique.push(*whale_trait);
        }
    }
    unique
}

/// Chance that `whale_trait` is drawn for the offspring, before any fallback.
#[must_use]
pub fn inherit_chance(
    parent_a: &[WhaleTrait],
    parent_b: &[WhaleTrait],
    whale_trait: WhaleTrait,
) -> f64 {
    let combined = count_trait(parent_a, whale_trait) + count_trait(parent_b, whale_trait);
    count_to_f64(combined) / INHERIT_CHANCE_DIVISOR
}

/// Roll the offspring's traits.
///
/// One draw per unique trait, accepted when strictly below its inherit
/// chance. If nothing was accepted, one more draw force-includes a uniformly
/// chosen trait.
pub fn breed_traits(
    parent_a: &[WhaleTrait],
    parent_b: &[WhaleTrait],
    rng: &mut impl RandomSource,
) -> TraitList {
    let unique = unique_traits(parent_a, parent_b);
    let mut selected = TraitList::new();

    for whale_trait in &unique {
        let chance = inherit_chance(parent_a, parent_b, *whale_trait);
        if rng.next_unit() < chance {
            selected.push(*whale_trait);
        }
    }

    if selected.is_empty() && !unique.is_empty() {
        let fallback = unique[rng.pick_index(unique.len())];
        log::trace!("no trait passed its roll; forcing {fallback}");
        selected.push(fallback);
    }

    selected
}

/// Per-trait odds for display. Traits carried by both parents report exactly
/// 1; the rest report their raw inherit chance. Consumes no randomness.
#[must_use]
pub fn predict_offspring_traits(
    parent_a: &[WhaleTrait],
    parent_b: &[WhaleTrait],
) -> Vec<TraitOdds> {
    unique_traits(parent_a, parent_b)
        .into_iter()
        .map(|whale_trait| {
            let in_both = parent_a.contains(&whale_trait) && parent_b.contains(&whale_trait);
            let probability = if in_both {
                1.0
            } else {
                inherit_chance(parent_a, parent_b, whale_trait)
            };
            TraitOdds {
                whale_trait,
                probability,
            }
        })
        .collect()
}
