use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use whalesong_game::{Direction, GameState, Position, TileKind, check_system};

const TRADE_LOT: i64 = 10;
const SELL_RESERVE: i64 = 20;
const GOSSIP_EVERY_TURNS: u32 = 3;
const EVOLUTION_EVERY_TURNS: u32 = 7;

/// One intent submitted to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoyageAction {
    Steer(Direction),
    Breed(usize),
    Buy(i64),
    Sell(i64),
    Gossip,
    Evolution,
}

impl fmt::Display for VoyageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steer(direction) => write!(f, "steer {direction:?}"),
            Self::Breed(index) => write!(f, "breed pod {index}"),
            Self::Buy(amount) => write!(f, "buy {amount}"),
            Self::Sell(amount) => write!(f, "sell {amount}"),
            Self::Gossip => f.write_str("gossip"),
            Self::Evolution => f.write_str("evolution"),
        }
    }
}

/// Policy interface for automated voyages.
pub trait VoyagePolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Intents to submit before the turn advances.
    fn plan_turn(&mut self, state: &GameState) -> Vec<VoyageAction>;
}

/// Built-in voyage strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoyageStrategy {
    /// Tour every breeding ground and breed at each.
    Breeder,
    /// Park at the nearest waystation and trade.
    Trader,
    /// Random walk that listens for gossip.
    Wanderer,
    /// Stay put and let the seasons turn.
    Idle,
}

impl VoyageStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breeder => "Breeder",
            Self::Trader => "Trader",
            Self::Wanderer => "Wanderer",
            Self::Idle => "Idle",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn VoyagePolicy> {
        match self {
            Self::Breeder => Box::new(BreederPolicy),
            Self::Trader => Box::new(TraderPolicy),
            Self::Wanderer => Box::new(WandererPolicy::new(seed)),
            Self::Idle => Box::new(IdlePolicy),
        }
    }
}

impl fmt::Display for VoyageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct BreederPolicy;
struct TraderPolicy;
struct IdlePolicy;

struct WandererPolicy {
    rng: ChaCha20Rng,
}

impl WandererPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

/// Single step from `from` toward `to`, horizontal first.
fn heading(from: Position, to: Position) -> Option<Direction> {
    if from.x < to.x {
        Some(Direction::Right)
    } else if from.x > to.x {
        Some(Direction::Left)
    } else if from.y < to.y {
        Some(Direction::Down)
    } else if from.y > to.y {
        Some(Direction::Up)
    } else {
        None
    }
}

fn nearest_of_kind(state: &GameState, kind: TileKind) -> Option<Position> {
    let ship = state.ship_position;
    state
        .world
        .tiles_of_kind(kind)
        .into_iter()
        .map(|tile| Position::new(tile.x, tile.y))
        .min_by_key(|pos| (pos.x - ship.x).abs() + (pos.y - ship.y).abs())
}

impl VoyagePolicy for BreederPolicy {
    fn name(&self) -> &'static str {
        "Breeder"
    }

    fn plan_turn(&mut self, state: &GameState) -> Vec<VoyageAction> {
        if let Some(opportunity) = &state.breeding_opportunity {
            let last = opportunity.available_pods.len().saturating_sub(1);
            return vec![VoyageAction::Breed(last)];
        }
        let grounds = state.world.tiles_of_kind(TileKind::BreedingGround);
        if grounds.is_empty() {
            return Vec::new();
        }
        // Each completed breeding moves the tour on to the next ground.
        let offspring = state.whales.len().saturating_sub(1);
        let target = grounds[offspring % grounds.len()];
        let target = Position::new(target.x, target.y);
        heading(state.ship_position, target)
            .map(VoyageAction::Steer)
            .into_iter()
            .collect()
    }
}

impl VoyagePolicy for TraderPolicy {
    fn name(&self) -> &'static str {
        "Trader"
    }

    fn plan_turn(&mut self, state: &GameState) -> Vec<VoyageAction> {
        if check_system(state) {
            if state.aether_mist >= SELL_RESERVE {
                return vec![VoyageAction::Sell(TRADE_LOT)];
            }
            return vec![VoyageAction::Buy(TRADE_LOT)];
        }
        nearest_of_kind(state, TileKind::Waystation)
            .and_then(|target| heading(state.ship_position, target))
            .map(VoyageAction::Steer)
            .into_iter()
            .collect()
    }
}

impl VoyagePolicy for WandererPolicy {
    fn name(&self) -> &'static str {
        "Wanderer"
    }

    fn plan_turn(&mut self, state: &GameState) -> Vec<VoyageAction> {
        const DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let mut actions = vec![VoyageAction::Steer(
            DIRECTIONS[self.rng.gen_range(0..DIRECTIONS.len())],
        )];
        if state.turn % GOSSIP_EVERY_TURNS == 0 {
            actions.push(VoyageAction::Gossip);
        }
        if state.turn % EVOLUTION_EVERY_TURNS == 0 {
            actions.push(VoyageAction::Evolution);
        }
        actions
    }
}

impl VoyagePolicy for IdlePolicy {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn plan_turn(&mut self, _state: &GameState) -> Vec<VoyageAction> {
        Vec::new()
    }
}
