use anyhow::{Result, ensure};
use whalesong_game::SeasonName;

use crate::logic::{GameTester, SimulationPlan, SimulationSummary, VoyageStrategy};

/// Logic test scenario: a named voyage plan plus its expectations.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn simulation(name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

const SCENARIOS: &[(&str, &str)] = &[
    ("smoke", "Idle voyage; the snapshot stays sane turn over turn"),
    (
        "breeding-tour",
        "Breeder tours the breeding grounds and grows the fleet",
    ),
    (
        "trade-loop",
        "Trader docks at a waystation and cycles aether mist",
    ),
    (
        "season-cycle",
        "Full 80-turn cycle visits every season and returns to spring",
    ),
    (
        "narrative-log",
        "Wanderer floods the gossip and evolution logs past their cap",
    ),
    (
        "deterministic-voyage",
        "Replays a seed and compares snapshot fingerprints",
    ),
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let scenario = match name.to_lowercase().as_str() {
        "smoke" => TestScenario::simulation(
            "Smoke Voyage",
            SimulationPlan::new(VoyageStrategy::Idle).with_expectation(smoke_expectation),
        ),
        "breeding-tour" | "breeding" => TestScenario::simulation(
            "Breeding Tour",
            SimulationPlan::new(VoyageStrategy::Breeder)
                .with_max_turns(60)
                .with_expectation(sanity_expectation)
                .with_expectation(breeding_expectation),
        ),
        "trade-loop" | "trade" => TestScenario::simulation(
            "Trade Loop",
            SimulationPlan::new(VoyageStrategy::Trader)
                .with_max_turns(40)
                .with_expectation(sanity_expectation)
                .with_expectation(trade_expectation),
        ),
        "season-cycle" | "seasons" => TestScenario::simulation(
            "Season Cycle",
            SimulationPlan::new(VoyageStrategy::Idle)
                .with_max_turns(80)
                .with_expectation(season_expectation),
        ),
        "narrative-log" | "narrative" => TestScenario::simulation(
            "Narrative Log",
            SimulationPlan::new(VoyageStrategy::Wanderer)
                .with_max_turns(180)
                .with_expectation(sanity_expectation)
                .with_expectation(narrative_expectation),
        ),
        "deterministic-voyage" | "deterministic" => TestScenario::simulation(
            "Deterministic Voyage",
            SimulationPlan::new(VoyageStrategy::Wanderer)
                .with_expectation(deterministic_expectation),
        ),
        _ => return None,
    };
    Some(scenario)
}

fn sanity_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(!state.whales.is_empty(), "fleet should never be empty");
    ensure!(
        state.aether_mist >= 0,
        "aether mist went negative: {}",
        state.aether_mist
    );
    ensure!(
        state.trade_inventory.aether_mist >= 0,
        "trade inventory went negative: {}",
        state.trade_inventory.aether_mist
    );
    Ok(())
}

fn smoke_expectation(summary: &SimulationSummary) -> Result<()> {
    sanity_expectation(summary)?;
    let expected = u32::try_from(summary.turns.len())?;
    ensure!(
        summary.final_state.turn == expected,
        "turn counter {} does not match {} simulated turns",
        summary.final_state.turn,
        expected
    );
    Ok(())
}

fn breeding_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.metrics.breeds >= 2,
        "expected at least two breeds, got {}",
        summary.metrics.breeds
    );
    let offspring = &summary.final_state.whales[1..];
    ensure!(
        offspring.iter().all(|whale| whale.generation >= 2),
        "offspring should be at least generation 2"
    );
    ensure!(
        offspring.iter().all(|whale| whale.name.contains("Nimbus")),
        "offspring should carry the primary whale's name"
    );
    Ok(())
}

fn trade_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(summary.metrics.trades > 0, "trader never completed a trade");
    let negative = summary
        .turns
        .iter()
        .find(|record| record.aether_mist < 0 || record.trade_stock < 0);
    ensure!(
        negative.is_none(),
        "negative balance recorded on turn {}",
        negative.map_or(0, |record| record.turn)
    );
    Ok(())
}

fn season_expectation(summary: &SimulationSummary) -> Result<()> {
    let visited = &summary.metrics.seasons_visited;
    for season in SeasonName::CYCLE {
        ensure!(
            visited.contains(season.as_str()),
            "season {season} was never visited"
        );
    }
    let season = summary.final_state.season_or_default();
    ensure!(
        season.current_season == SeasonName::Spring && season.turn_in_season == 0,
        "cycle should end at the start of spring, found {} turn {}",
        season.current_season,
        season.turn_in_season
    );
    Ok(())
}

fn narrative_expectation(summary: &SimulationSummary) -> Result<()> {
    let gossip = summary.final_state.gossip_log_or_default();
    let evolution = summary.final_state.evolution_log_or_default();
    ensure!(
        gossip.len() <= gossip.max_entries && evolution.len() <= evolution.max_entries,
        "narrative logs exceeded their capacity"
    );
    ensure!(
        gossip.len() + evolution.len() <= summary.metrics.narrative_entries,
        "logs hold more entries than were generated"
    );
    ensure!(
        gossip.entries.windows(2).all(|pair| pair[0].turn >= pair[1].turn),
        "gossip log is not newest-first"
    );
    ensure!(
        evolution
            .entries
            .windows(2)
            .all(|pair| pair[0].turn >= pair[1].turn),
        "evolution log is not newest-first"
    );
    Ok(())
}

fn deterministic_expectation(summary: &SimulationSummary) -> Result<()> {
    let turns = u32::try_from(summary.turns.len())?;
    let plan = SimulationPlan::new(summary.strategy).with_max_turns(turns);
    let replay = GameTester::new(false, turns).run_plan(&plan, summary.seed);
    ensure!(
        replay.fingerprint() == summary.fingerprint(),
        "replay diverged: {} vs {}",
        replay.fingerprint(),
        summary.fingerprint()
    );
    Ok(())
}
