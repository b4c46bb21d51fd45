//! Whale Song Game Engine
//!
//! Turn-based simulation core for the Whale Song sky-whale breeding game:
//! world grid, trait inheritance, aether mist economy, seasons and narrative
//! logs. Every intent takes a snapshot and returns a new one; the crate has
//! no rendering, input or storage dependencies.

pub mod breeding;
pub mod config;
pub mod constants;
pub mod economy;
pub mod game;
pub mod narrative;
pub mod numbers;
pub mod rng;
pub mod season;
pub mod state;
pub mod whale;
pub mod world;

// Re-export commonly used types
pub use breeding::{TraitOdds, breed_traits, inherit_chance, predict_offspring_traits};
pub use config::{ConfigError, EngineConfig};
pub use economy::{
    AetherMistConfig, TradeConfig, TradeError, TradeReceipt, buy_aether_mist,
    calculate_aether_mist_change, production_rating, quote_buy, quote_sell, sell_aether_mist,
};
pub use game::{GameService, check_system, generate_wild_pods};
pub use narrative::evolution::{EvolutionEvent, EvolutionLog};
pub use narrative::gossip::{Gossip, GossipLog};
pub use narrative::{Faction, RollingLog};
pub use rng::{GameRng, RandomSource, ScriptedRolls};
pub use season::{
    AirCurrents, EnvironmentalPressure, SeasonCalendar, SeasonConfig, SeasonName, SeasonState,
    SeasonStateOverlay, SeasonSystem, Temperature, create_season_system,
};
pub use state::{BreedingOpportunity, GameState, TradeInventory};
pub use whale::{TraitList, Whale, WhaleStats, WhaleTrait};
pub use world::{Direction, Position, Tile, TileKind, World, create_world};
