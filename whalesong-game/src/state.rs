use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::constants::{STARTING_AETHER_MIST, STARTING_TRADE_INVENTORY};
use crate::narrative::evolution::{self, EvolutionLog};
use crate::narrative::gossip::{self, GossipLog};
use crate::season::{SeasonState, initialize_season_state};
use crate::whale::Whale;
use crate::world::{Position, Tile, World};

/// Trading stock kept apart from the fleet's own mist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInventory {
    pub aether_mist: i64,
}

impl Default for TradeInventory {
    fn default() -> Self {
        Self {
            aether_mist: STARTING_TRADE_INVENTORY,
        }
    }
}

/// Wild pods on offer while the ship sits on a breeding ground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingOpportunity {
    pub location_name: String,
    pub available_pods: Vec<Whale>,
}

/// Immutable snapshot of a voyage.
///
/// Intents never edit a snapshot in place; they build a new one and hand it
/// back behind an `Rc`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub world: Rc<World>,
    #[serde(default)]
    pub ship_position: Position,
    /// Index 0 is the primary whale used for breeding.
    #[serde(default)]
    pub whales: Vec<Whale>,
    #[serde(default)]
    pub turn: u32,
    #[serde(default = "default_aether_mist")]
    pub aether_mist: i64,
    #[serde(default)]
    pub trade_inventory: TradeInventory,
    #[serde(default)]
    pub breeding_opportunity: Option<BreedingOpportunity>,
    #[serde(default)]
    pub breeding_menu_open: bool,
    #[serde(default)]
    pub whale_status_open: bool,
    #[serde(default)]
    pub waystation_menu_open: bool,
    #[serde(default)]
    pub gossip_log: Option<GossipLog>,
    #[serde(default)]
    pub evolution_log: Option<EvolutionLog>,
    #[serde(default)]
    pub season_state: Option<SeasonState>,
}

const fn default_aether_mist() -> i64 {
    STARTING_AETHER_MIST
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            world: Rc::new(World::default()),
            ship_position: Position::default(),
            whales: Vec::new(),
            turn: 0,
            aether_mist: STARTING_AETHER_MIST,
            trade_inventory: TradeInventory::default(),
            breeding_opportunity: None,
            breeding_menu_open: false,
            whale_status_open: false,
            waystation_menu_open: false,
            gossip_log: None,
            evolution_log: None,
            season_state: None,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn primary_whale(&self) -> Option<&Whale> {
        self.whales.first()
    }

    #[must_use]
    pub fn current_tile(&self) -> Option<&Tile> {
        self.world.tile_at(self.ship_position)
    }

    /// Season state, or the start of a fresh cycle when none is recorded.
    #[must_use]
    pub fn season_or_default(&self) -> SeasonState {
        self.season_state.unwrap_or_else(initialize_season_state)
    }

    #[must_use]
    pub fn gossip_log_or_default(&self) -> GossipLog {
        self.gossip_log.clone().unwrap_or_else(gossip::initialize_log)
    }

    #[must_use]
    pub fn evolution_log_or_default(&self) -> EvolutionLog {
        self.evolution_log
            .clone()
            .unwrap_or_else(evolution::initialize_log)
    }

    /// Copy of this snapshot with `edit` applied, as a new shared snapshot.
    #[must_use]
    pub fn with(&self, edit: impl FnOnce(&mut Self)) -> Rc<Self> {
        let mut next = self.clone();
        edit(&mut next);
        Rc::new(next)
    }
}
