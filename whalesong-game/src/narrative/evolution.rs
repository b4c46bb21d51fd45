//! Observed adaptations in wild whale pods.
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Faction, NarrativeTemplate, RollingLog, pick_template};
use crate::rng::RandomSource;
use crate::state::GameState;

static NEXT_EVOLUTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEvent {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
    pub turn: u32,
}

impl EvolutionEvent {
    fn new(text: impl Into<String>, faction: Option<Faction>, turn: u32) -> Self {
        let id = NEXT_EVOLUTION_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("evolution-{id}"),
            text: text.into(),
            faction,
            turn,
        }
    }
}

pub type EvolutionLog = RollingLog<EvolutionEvent>;

pub const EVOLUTION_TEMPLATES: &[NarrativeTemplate] = &[
    NarrativeTemplate {
        text: "Whale pod developed thermal resistance due to recent heatwaves.",
        factions: &[Faction::Explorer, Faction::Scholar],
    },
    NarrativeTemplate {
        text: "Whale pod evolved faster swimming speed to catch prey.",
        factions: &[Faction::Explorer],
    },
    NarrativeTemplate {
        text: "Whale pod developed improved aether mist harvesting efficiency.",
        factions: &[Faction::Merchant],
    },
    NarrativeTemplate {
        text: "Whale pod became more elusive, avoiding predators.",
        factions: &[Faction::Hermit],
    },
    NarrativeTemplate {
        text: "Whale pod developed resilience to air currents.",
        factions: &[Faction::Explorer, Faction::Scholar],
    },
];

#[must_use]
pub const fn initialize_log() -> EvolutionLog {
    RollingLog::new()
}

#[must_use]
pub fn add_entry(
    log: Option<&EvolutionLog>,
    text: impl Into<String>,
    faction: Option<Faction>,
    turn: u32,
) -> EvolutionLog {
    let mut next = log.cloned().unwrap_or_default();
    next.push_newest(EvolutionEvent::new(text, faction, turn));
    next
}

pub fn generate_random<R: RandomSource + ?Sized>(
    rng: &mut R,
    turn: u32,
    faction_filter: Option<&[Faction]>,
) -> EvolutionEvent {
    let (text, faction) = pick_template(EVOLUTION_TEMPLATES, rng, faction_filter);
    EvolutionEvent::new(text, faction, turn)
}

#[must_use]
pub fn add_evolution_to_state(
    state: &GameState,
    text: impl Into<String>,
    faction: Option<Faction>,
) -> Rc<GameState> {
    let mut next = state.clone();
    next.evolution_log = Some(add_entry(
        state.evolution_log.as_ref(),
        text,
        faction,
        state.turn,
    ));
    Rc::new(next)
}

pub fn add_random_evolution_to_state<R: RandomSource + ?Sized>(
    state: &GameState,
    rng: &mut R,
    faction_filter: Option<&[Faction]>,
) -> Rc<GameState> {
    let event = generate_random(rng, state.turn, faction_filter);
    add_evolution_to_state(state, event.text, event.faction)
}
