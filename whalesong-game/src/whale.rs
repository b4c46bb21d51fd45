//! Whales and their heritable traits.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::{WHALE_BASE_HEALTH, WHALE_BASE_PRODUCTION};

static NEXT_WHALE_ID: AtomicU64 = AtomicU64::new(1);

/// Trait multiset stored inline for the common small case.
pub type TraitList = SmallVec<[WhaleTrait; 4]>;

/// Heritable attribute tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhaleTrait {
    Speed,
    Capacity,
    Resilience,
    Thermotolerance,
    PredatorDeterrence,
    Efficiency,
    Consumption,
}

impl WhaleTrait {
    pub const ALL: [Self; 7] = [
        Self::Speed,
        Self::Capacity,
        Self::Resilience,
        Self::Thermotolerance,
        Self::PredatorDeterrence,
        Self::Efficiency,
        Self::Consumption,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Capacity => "capacity",
            Self::Resilience => "resilience",
            Self::Thermotolerance => "thermotolerance",
            Self::PredatorDeterrence => "predator_deterrence",
            Self::Efficiency => "efficiency",
            Self::Consumption => "consumption",
        }
    }
}

impl fmt::Display for WhaleTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhaleTrait {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhaleStats {
    pub health: u32,
    pub max_health: u32,
    pub aether_mist_production: u32,
}

impl Default for WhaleStats {
    fn default() -> Self {
        Self {
            health: WHALE_BASE_HEALTH,
            max_health: WHALE_BASE_HEALTH,
            aether_mist_production: WHALE_BASE_PRODUCTION,
        }
    }
}

/// A breedable creature, either in the player's fleet or a wild pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whale {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub traits: TraitList,
    #[serde(default)]
    pub stats: WhaleStats,
    pub generation: u32,
}

impl Whale {
    /// New first-generation whale with default stats and a process-unique id.
    #[must_use]
    pub fn new(name: impl Into<String>, traits: impl IntoIterator<Item = WhaleTrait>) -> Self {
        Self {
            id: next_whale_id(),
            name: name.into(),
            traits: traits.into_iter().collect(),
            stats: WhaleStats::default(),
            generation: 1,
        }
    }

    /// Override the generation, keeping the floor of 1.
    #[must_use]
    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation.max(1);
        self
    }

    #[must_use]
    pub fn has_trait(&self, whale_trait: WhaleTrait) -> bool {
        self.traits.contains(&whale_trait)
    }

    /// Multiplicity of `whale_trait` in this whale's trait list.
    #[must_use]
    pub fn trait_count(&self, whale_trait: WhaleTrait) -> usize {
        count_trait(&self.traits, whale_trait)
    }
}

pub(crate) fn count_trait(traits: &[WhaleTrait], whale_trait: WhaleTrait) -> usize {
    traits.iter().filter(|t| **t == whale_trait).count()
}

fn next_whale_id() -> String {
    let id = NEXT_WHALE_ID.fetch_add(1, Ordering::Relaxed);
    format!("whale-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_whales_get_default_stats() {
        let whale = Whale::new("Nimbus", [WhaleTrait::Speed]);
        assert_eq!(whale.name, "Nimbus");
        assert_eq!(whale.generation, 1);
        assert_eq!(whale.stats.health, 100);
        assert_eq!(whale.stats.max_health, 100);
        assert_eq!(whale.stats.aether_mist_production, 1);
        assert!(whale.id.starts_with("whale-"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Whale::new("A", []);
        let b = Whale::new("B", []);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn duplicate_traits_are_counted() {
        let whale = Whale::new(
            "Echo",
            [WhaleTrait::Speed, WhaleTrait::Speed, WhaleTrait::Capacity],
        );
        assert_eq!(whale.trait_count(WhaleTrait::Speed), 2);
        assert_eq!(whale.trait_count(WhaleTrait::Capacity), 1);
        assert_eq!(whale.trait_count(WhaleTrait::Consumption), 0);
        assert!(whale.has_trait(WhaleTrait::Capacity));
        assert!(!whale.has_trait(WhaleTrait::Efficiency));
    }

    #[test]
    fn generation_never_drops_below_one() {
        assert_eq!(Whale::new("Z", []).with_generation(0).generation, 1);
        assert_eq!(Whale::new("Z", []).with_generation(4).generation, 4);
    }

    #[test]
    fn traits_parse_from_their_keys() {
        for whale_trait in WhaleTrait::ALL {
            assert_eq!(whale_trait.as_str().parse::<WhaleTrait>(), Ok(whale_trait));
        }
        assert!("wings".parse::<WhaleTrait>().is_err());
    }

    #[test]
    fn whales_roundtrip_through_json() {
        let whale = Whale::new("Drift", [WhaleTrait::PredatorDeterrence]);
        let json = serde_json::to_string(&whale).unwrap();
        assert!(json.contains("predator_deterrence"));
        let back: Whale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, whale);
    }
}
