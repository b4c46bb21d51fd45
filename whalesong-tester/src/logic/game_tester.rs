use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use whalesong_game::{GameService, GameState, SeasonName};

use crate::logic::policy::{VoyageAction, VoyageStrategy};

pub const DEFAULT_VOYAGE_TURNS: u32 = 40;

/// Declarative plan for running a voyage.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: VoyageStrategy,
    pub max_turns: Option<u32>,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub const fn new(strategy: VoyageStrategy) -> Self {
        Self {
            strategy,
            max_turns: None,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Assertion hook run after a voyage completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// What happened during one turn.
#[derive(Debug, Clone)]
pub struct TurnRecord {
    pub turn: u32,
    pub actions: Vec<String>,
    pub rejected: usize,
    pub aether_mist: i64,
    pub trade_stock: i64,
    pub fleet_size: usize,
    pub season: SeasonName,
}

/// Intent counters accumulated over a voyage.
#[derive(Debug, Clone, Default)]
pub struct VoyageMetrics {
    pub breeds: usize,
    pub trades: usize,
    pub rejected_intents: usize,
    pub narrative_entries: usize,
    pub seasons_visited: BTreeSet<&'static str>,
    pub rng_draws: u64,
}

/// Complete record of a voyage.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: VoyageStrategy,
    pub turns: Vec<TurnRecord>,
    pub metrics: VoyageMetrics,
    pub final_state: GameState,
}

impl SimulationSummary {
    /// Compact digest of the final snapshot for determinism checks.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let state = &self.final_state;
        let traits: Vec<String> = state
            .whales
            .iter()
            .map(|whale| {
                whale
                    .traits
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("+")
            })
            .collect();
        format!(
            "turn={} pos={} mist={} stock={} fleet=[{}] gossip={} evolution={}",
            state.turn,
            state.ship_position,
            state.aether_mist,
            state.trade_inventory.aether_mist,
            traits.join(","),
            state.gossip_log_or_default().len(),
            state.evolution_log_or_default().len()
        )
    }
}

/// Headless deterministic runner for the engine.
#[derive(Debug, Clone)]
pub struct GameTester {
    verbose: bool,
    default_turns: u32,
}

impl GameTester {
    pub const fn new(verbose: bool, default_turns: u32) -> Self {
        Self {
            verbose,
            default_turns,
        }
    }

    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> SimulationSummary {
        let mut service = GameService::from_seed(seed);
        let mut policy = plan.strategy.create_policy(seed);
        let max_turns = plan.max_turns.unwrap_or(self.default_turns);

        let mut state = service.initialize();
        let mut turns = Vec::new();
        let mut metrics = VoyageMetrics::default();
        metrics
            .seasons_visited
            .insert(state.season_or_default().current_season.as_str());

        for _ in 0..max_turns {
            let actions = policy.plan_turn(&state);
            let mut rejected = 0;
            for action in &actions {
                let next = apply_action(&mut service, &state, *action);
                if Rc::ptr_eq(&next, &state) {
                    rejected += 1;
                } else {
                    match action {
                        VoyageAction::Breed(_) => metrics.breeds += 1,
                        VoyageAction::Buy(_) | VoyageAction::Sell(_) => metrics.trades += 1,
                        VoyageAction::Gossip | VoyageAction::Evolution => {
                            metrics.narrative_entries += 1;
                        }
                        VoyageAction::Steer(_) => {}
                    }
                }
                state = next;
            }
            state = service.next_turn(&state);

            let season = state.season_or_default().current_season;
            metrics.seasons_visited.insert(season.as_str());
            metrics.rejected_intents += rejected;
            if self.verbose {
                println!(
                    "   turn {:>3} [{}] mist {} stock {} fleet {} {}",
                    state.turn,
                    policy.name(),
                    state.aether_mist,
                    state.trade_inventory.aether_mist,
                    state.whales.len(),
                    season
                );
            }
            turns.push(TurnRecord {
                turn: state.turn,
                actions: actions.iter().map(ToString::to_string).collect(),
                rejected,
                aether_mist: state.aether_mist,
                trade_stock: state.trade_inventory.aether_mist,
                fleet_size: state.whales.len(),
                season,
            });
        }
        metrics.rng_draws = service.rng().draws();
        log::debug!(
            "voyage seed {seed} ({}) finished after {} turns",
            plan.strategy,
            turns.len()
        );

        SimulationSummary {
            seed,
            strategy: plan.strategy,
            turns,
            metrics,
            final_state: GameState::clone(&state),
        }
    }
}

fn apply_action(
    service: &mut GameService,
    state: &Rc<GameState>,
    action: VoyageAction,
) -> Rc<GameState> {
    match action {
        VoyageAction::Steer(direction) => service.steer(state, direction),
        VoyageAction::Breed(index) => service.breed_whale(state, index),
        VoyageAction::Buy(amount) => service.buy_aether_mist(state, amount),
        VoyageAction::Sell(amount) => service.sell_aether_mist(state, amount),
        VoyageAction::Gossip => service.add_random_gossip(state, None),
        VoyageAction::Evolution => service.add_random_evolution(state, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_turn_limit_overrides_default() {
        let tester = GameTester::new(false, 5);
        let plan = SimulationPlan::new(VoyageStrategy::Idle).with_max_turns(12);
        let summary = tester.run_plan(&plan, 1);
        assert_eq!(summary.turns.len(), 12);
        assert_eq!(summary.final_state.turn, 12);

        let defaulted = tester.run_plan(&SimulationPlan::new(VoyageStrategy::Idle), 1);
        assert_eq!(defaulted.turns.len(), 5);
    }

    #[test]
    fn breeder_grows_the_fleet() {
        let tester = GameTester::new(false, 60);
        let summary = tester.run_plan(&SimulationPlan::new(VoyageStrategy::Breeder), 7);
        assert!(summary.metrics.breeds >= 2);
        assert_eq!(summary.final_state.whales.len(), summary.metrics.breeds + 1);
        assert!(summary.metrics.rng_draws > 0);
    }

    #[test]
    fn trader_executes_trades() {
        let tester = GameTester::new(false, 30);
        let summary = tester.run_plan(&SimulationPlan::new(VoyageStrategy::Trader), 3);
        assert!(summary.metrics.trades > 0);
        assert!(summary.final_state.aether_mist >= 0);
        assert!(summary.final_state.trade_inventory.aether_mist >= 0);
    }

    #[test]
    fn identical_seeds_share_fingerprints() {
        let tester = GameTester::new(false, 25);
        let plan = SimulationPlan::new(VoyageStrategy::Wanderer);
        assert_eq!(
            tester.run_plan(&plan, 99).fingerprint(),
            tester.run_plan(&plan, 99).fingerprint()
        );
    }
}
