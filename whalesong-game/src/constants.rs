//! Centralized tuning constants for the Whale Song simulation.
//!
//! Amounts are illustrative rather than balanced. Keeping them together means
//! gameplay is only adjusted through reviewed code changes.

use crate::whale::WhaleTrait;

// World layout -------------------------------------------------------------
pub const WORLD_WIDTH: i32 = 20;
pub const WORLD_HEIGHT: i32 = 15;

pub(crate) const ISLAND_POSITIONS: [(i32, i32); 4] = [(5, 5), (10, 8), (15, 3), (3, 12)];
pub(crate) const WAYSTATION_POSITIONS: [(i32, i32, &str); 2] = [
    (7, 7, "Circuit Waystation"),
    (12, 5, "Vortex Outpost"),
];
pub(crate) const BREEDING_GROUND_POSITIONS: [(i32, i32, &str); 3] = [
    (2, 10, "Whispering Shoals"),
    (16, 8, "Aurora Drift"),
    (9, 2, "Skyward Nest"),
];

// Fleet and starting economy -----------------------------------------------
pub const STARTING_AETHER_MIST: i64 = 50;
pub const STARTING_TRADE_INVENTORY: i64 = 100;
pub(crate) const STARTING_WHALE_NAME: &str = "Nimbus";
pub(crate) const STARTING_WHALE_TRAITS: [WhaleTrait; 2] = [WhaleTrait::Speed, WhaleTrait::Efficiency];
pub(crate) const WHALE_BASE_HEALTH: u32 = 100;
pub(crate) const WHALE_BASE_PRODUCTION: u32 = 1;
pub(crate) const FALLBACK_BREEDING_GROUND_NAME: &str = "Breeding Ground";

// Breeding -------------------------------------------------------------------
/// Denominator of the per-trait inheritance odds: two parents, two copies each.
pub(crate) const INHERIT_CHANCE_DIVISOR: f64 = 4.0;
pub(crate) const POD_GROWTH_INTERVAL_TURNS: u32 = 5;
pub(crate) const POD_BASE_COUNT: usize = 3;
/// Wild pods cycle through these pairs in order.
pub(crate) const WILD_POD_TRAIT_PAIRS: [[WhaleTrait; 2]; 4] = [
    [WhaleTrait::Speed, WhaleTrait::Capacity],
    [WhaleTrait::Resilience, WhaleTrait::Thermotolerance],
    [WhaleTrait::PredatorDeterrence, WhaleTrait::Efficiency],
    [WhaleTrait::Consumption, WhaleTrait::Speed],
];
pub(crate) const WILD_POD_NAME_PREFIX: &str = "Wild Pod";
pub(crate) const OFFSPRING_NAME_SUFFIX: &str = "Jr.";

// Aether mist defaults -------------------------------------------------------
pub(crate) const DEFAULT_BASE_PRODUCTION: f64 = 1.0;
pub(crate) const DEFAULT_GENERATION_MULTIPLIER: f64 = 0.5;
pub(crate) const DEFAULT_EFFICIENCY_BONUS: f64 = 0.5;
pub(crate) const DEFAULT_CONSUMPTION_PENALTY: f64 = 0.3;
pub(crate) const DEFAULT_BUY_PRICE_PER_UNIT: i64 = 2;
pub(crate) const DEFAULT_SELL_PRICE_PER_UNIT: i64 = 1;
pub(crate) const CAPACITY_RATING_BONUS: f64 = 0.5;
pub(crate) const RESILIENCE_RATING_BONUS: f64 = 0.25;

// Seasons --------------------------------------------------------------------
pub(crate) const DEFAULT_SEASON_DURATION_TURNS: u32 = 20;
pub(crate) const SPRING_BREEDING_BONUS: f64 = 0.15;
pub(crate) const WINTER_BREEDING_PENALTY: f64 = -0.10;

// Narrative logs -------------------------------------------------------------
pub const DEFAULT_LOG_CAPACITY: usize = 50;
pub(crate) const GOSSIP_GENERATION: u32 = 1;
pub(crate) const TRAVELER_SOURCE: &str = "traveler";
