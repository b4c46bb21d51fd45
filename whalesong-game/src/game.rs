//! The orchestrator: turns player intents into new snapshots.
use std::rc::Rc;

use crate::breeding::{TraitOdds, breed_traits, predict_offspring_traits};
use crate::config::{ConfigError, EngineConfig};
use crate::constants::{
    FALLBACK_BREEDING_GROUND_NAME, OFFSPRING_NAME_SUFFIX, POD_BASE_COUNT,
    POD_GROWTH_INTERVAL_TURNS, STARTING_WHALE_NAME, STARTING_WHALE_TRAITS, WILD_POD_NAME_PREFIX,
    WILD_POD_TRAIT_PAIRS,
};
use crate::economy::{buy_aether_mist, calculate_aether_mist_change, sell_aether_mist};
use crate::narrative::Faction;
use crate::narrative::evolution::add_random_evolution_to_state;
use crate::narrative::gossip::add_random_gossip_to_state;
use crate::rng::{GameRng, RandomSource};
use crate::season::EnvironmentalPressure;
use crate::state::{BreedingOpportunity, GameState};
use crate::whale::Whale;
use crate::world::{Direction, TileKind, create_world};

/// Number of wild pods a breeding ground offers on `turn`.
#[must_use]
pub fn wild_pod_count(turn: u32) -> usize {
    let growth = usize::try_from(turn / POD_GROWTH_INTERVAL_TURNS).unwrap_or(usize::MAX);
    growth.saturating_add(POD_BASE_COUNT)
}

/// First-generation wild pods with trait pairs assigned round-robin.
#[must_use]
pub fn generate_wild_pods(turn: u32) -> Vec<Whale> {
    (0..wild_pod_count(turn))
        .map(|index| {
            let pair = WILD_POD_TRAIT_PAIRS[index % WILD_POD_TRAIT_PAIRS.len()];
            Whale::new(format!("{WILD_POD_NAME_PREFIX} {}", index + 1), pair)
        })
        .collect()
}

/// True when the ship sits on a waystation.
#[must_use]
pub fn check_system(state: &GameState) -> bool {
    state
        .current_tile()
        .is_some_and(|tile| tile.kind == TileKind::Waystation)
}

/// Drives a voyage. Holds the engine configuration and the only mutable
/// collaborator, the random source.
#[derive(Debug, Clone)]
pub struct GameService<R = GameRng> {
    config: EngineConfig,
    rng: R,
}

impl GameService<GameRng> {
    /// Service with default configuration and a seeded generator.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(GameRng::from_user_seed(seed))
    }
}

impl Default for GameService<GameRng> {
    fn default() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl<R: RandomSource> GameService<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self {
            config: EngineConfig::default(),
            rng,
        }
    }

    /// # Errors
    ///
    /// Returns the first `ConfigError` found by [`EngineConfig::validate`].
    pub fn with_config(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }

    /// Fresh voyage: standard world, one starting whale, spring turn 0.
    #[must_use]
    pub fn initialize(&self) -> Rc<GameState> {
        let state = GameState {
            world: Rc::new(create_world()),
            whales: vec![Whale::new(STARTING_WHALE_NAME, STARTING_WHALE_TRAITS)],
            season_state: Some(self.config.seasons.initial_state()),
            ..GameState::default()
        };
        log::debug!(
            "voyage initialized with {} aether mist and {} trade stock",
            state.aether_mist,
            state.trade_inventory.aether_mist
        );
        Rc::new(state)
    }

    /// Fleet changes between turns. Currently nothing is born or lost.
    #[must_use]
    pub fn update_whale_population(&self, whales: &[Whale]) -> Vec<Whale> {
        whales.to_vec()
    }

    #[must_use]
    pub fn next_turn(&self, state: &Rc<GameState>) -> Rc<GameState> {
        let whales = self.update_whale_population(&state.whales);
        let produced = calculate_aether_mist_change(&whales, &self.config.aether_mist);
        let season = self.config.seasons.advance_turn(state.season_or_default());
        log::trace!(
            "turn {} produced {produced} aether mist",
            state.turn.saturating_add(1)
        );
        state.with(|next| {
            next.turn = next.turn.saturating_add(1);
            next.whales = whales;
            next.aether_mist = next.aether_mist.saturating_add(produced);
            next.season_state = Some(season);
        })
    }

    /// Relocate the ship without bounds checks and refresh the breeding
    /// opportunity for the destination tile.
    #[must_use]
    pub fn move_ship(&self, state: &Rc<GameState>, x: i32, y: i32) -> Rc<GameState> {
        let opportunity = state
            .world
            .get_tile(x, y)
            .filter(|tile| tile.kind == TileKind::BreedingGround)
            .map(|tile| {
                let location_name = tile
                    .name
                    .clone()
                    .unwrap_or_else(|| FALLBACK_BREEDING_GROUND_NAME.to_string());
                let available_pods = generate_wild_pods(state.turn);
                log::debug!(
                    "{} wild pods gathered at {location_name}",
                    available_pods.len()
                );
                BreedingOpportunity {
                    location_name,
                    available_pods,
                }
            });
        state.with(|next| {
            next.ship_position.x = x;
            next.ship_position.y = y;
            next.breeding_opportunity = opportunity;
        })
    }

    /// Move one tile in `direction`, staying on the grid.
    #[must_use]
    pub fn steer(&self, state: &Rc<GameState>, direction: Direction) -> Rc<GameState> {
        let target = state.world.clamp(state.ship_position.step(direction));
        self.move_ship(state, target.x, target.y)
    }

    #[must_use]
    pub fn generate_wild_pods(&self, turn: u32) -> Vec<Whale> {
        generate_wild_pods(turn)
    }

    /// Breed the primary whale with the chosen wild pod.
    ///
    /// Returns `state` itself when there is no opportunity, the index is out
    /// of range, or the fleet is empty.
    #[must_use]
    pub fn breed_whale(&mut self, state: &Rc<GameState>, pod_index: usize) -> Rc<GameState> {
        let Some(opportunity) = state.breeding_opportunity.as_ref() else {
            log::debug!("breeding ignored: no opportunity here");
            return Rc::clone(state);
        };
        let Some(pod) = opportunity.available_pods.get(pod_index) else {
            log::debug!("breeding ignored: no pod at index {pod_index}");
            return Rc::clone(state);
        };
        let Some(primary) = state.primary_whale() else {
            log::debug!("breeding ignored: fleet is empty");
            return Rc::clone(state);
        };

        let traits = breed_traits(&primary.traits, &pod.traits, &mut self.rng);
        let generation = primary.generation.max(pod.generation).saturating_add(1);
        let offspring = Whale::new(format!("{} {OFFSPRING_NAME_SUFFIX}", primary.name), traits)
            .with_generation(generation);
        log::debug!(
            "{} bred with {} at {}: {} (generation {generation})",
            primary.name,
            pod.name,
            opportunity.location_name,
            offspring.name
        );
        state.with(|next| {
            next.whales.push(offspring);
            next.breeding_opportunity = None;
        })
    }

    /// Inheritance odds for breeding the primary whale with a pod on offer.
    #[must_use]
    pub fn preview_offspring(&self, state: &GameState, pod_index: usize) -> Option<Vec<TraitOdds>> {
        let pod = state
            .breeding_opportunity
            .as_ref()?
            .available_pods
            .get(pod_index)?;
        let primary = state.primary_whale()?;
        Some(predict_offspring_traits(&primary.traits, &pod.traits))
    }

    #[must_use]
    pub fn buy_aether_mist(&self, state: &Rc<GameState>, amount: i64) -> Rc<GameState> {
        buy_aether_mist(state, amount, &self.config.trade)
    }

    #[must_use]
    pub fn sell_aether_mist(&self, state: &Rc<GameState>, amount: i64) -> Rc<GameState> {
        sell_aether_mist(state, amount, &self.config.trade)
    }

    #[must_use]
    pub fn toggle_whale_status(&self, state: &Rc<GameState>) -> Rc<GameState> {
        state.with(|next| next.whale_status_open = !next.whale_status_open)
    }

    #[must_use]
    pub fn toggle_waystation_menu(&self, state: &Rc<GameState>) -> Rc<GameState> {
        state.with(|next| next.waystation_menu_open = !next.waystation_menu_open)
    }

    #[must_use]
    pub fn toggle_breeding_menu(&self, state: &Rc<GameState>) -> Rc<GameState> {
        state.with(|next| next.breeding_menu_open = !next.breeding_menu_open)
    }

    #[must_use]
    pub fn check_system(&self, state: &GameState) -> bool {
        check_system(state)
    }

    /// Pressure of the season the snapshot is in.
    #[must_use]
    pub fn environmental_pressure(&self, state: &GameState) -> EnvironmentalPressure {
        *self
            .config
            .seasons
            .current_environmental_pressure(&state.season_or_default())
    }

    #[must_use]
    pub fn add_random_gossip(
        &mut self,
        state: &GameState,
        faction_filter: Option<&[Faction]>,
    ) -> Rc<GameState> {
        add_random_gossip_to_state(state, &mut self.rng, faction_filter)
    }

    #[must_use]
    pub fn add_random_evolution(
        &mut self,
        state: &GameState,
        faction_filter: Option<&[Faction]>,
    ) -> Rc<GameState> {
        add_random_evolution_to_state(state, &mut self.rng, faction_filter)
    }
}
