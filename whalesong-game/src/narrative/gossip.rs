//! Rumors picked up from informants along the route.
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Faction, NarrativeTemplate, RollingLog, pick_template};
use crate::constants::{GOSSIP_GENERATION, TRAVELER_SOURCE};
use crate::rng::RandomSource;
use crate::state::GameState;

static NEXT_GOSSIP_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gossip {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
    pub source: String,
    pub turn: u32,
    pub generation: u32,
}

impl Gossip {
    fn new(text: impl Into<String>, faction: Option<Faction>, turn: u32) -> Self {
        let id = NEXT_GOSSIP_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("gossip-{id}"),
            text: text.into(),
            faction,
            source: source_for(faction),
            turn,
            generation: GOSSIP_GENERATION,
        }
    }
}

pub type GossipLog = RollingLog<Gossip>;

pub const GOSSIP_TEMPLATES: &[NarrativeTemplate] = &[
    NarrativeTemplate {
        text: "Rumors say the western archipelago has rich breeding grounds.",
        factions: &[Faction::Explorer, Faction::Merchant],
    },
    NarrativeTemplate {
        text: "A new faction has established a waystation in the upper atmosphere.",
        factions: &[Faction::Explorer, Faction::Scholar],
    },
    NarrativeTemplate {
        text: "Aether mist prices are trending upward this season.",
        factions: &[Faction::Merchant],
    },
    NarrativeTemplate {
        text: "The scholars have discovered a new whale trait combination.",
        factions: &[Faction::Scholar],
    },
    NarrativeTemplate {
        text: "Hermit nomads are offering rare breeding pairs at discounted rates.",
        factions: &[Faction::Hermit, Faction::Merchant],
    },
    NarrativeTemplate {
        text: "Whale pods are developing thermal resistance due to recent heatwaves.",
        factions: &[Faction::Explorer, Faction::Scholar],
    },
    NarrativeTemplate {
        text: "A massive whale pod has been spotted migrating eastward.",
        factions: &[Faction::Explorer],
    },
    NarrativeTemplate {
        text: "Rich aether mist deposits have been found near the southern floating islands.",
        factions: &[Faction::Merchant, Faction::Explorer],
    },
    NarrativeTemplate {
        text: "Local factions are hosting a trade festival next turn.",
        factions: &[Faction::Merchant, Faction::Explorer],
    },
    NarrativeTemplate {
        text: "Scholars report unusual whale migration patterns this season.",
        factions: &[Faction::Scholar],
    },
];

/// Who a rumor is attributed to.
#[must_use]
pub fn source_for(faction: Option<Faction>) -> String {
    faction.map_or_else(
        || TRAVELER_SOURCE.to_string(),
        |faction| format!("{faction} informant"),
    )
}

#[must_use]
pub const fn initialize_log() -> GossipLog {
    RollingLog::new()
}

/// Copy of `log` (or a fresh log) with a new rumor in front.
#[must_use]
pub fn add_entry(
    log: Option<&GossipLog>,
    text: impl Into<String>,
    faction: Option<Faction>,
    turn: u32,
) -> GossipLog {
    let mut next = log.cloned().unwrap_or_default();
    next.push_newest(Gossip::new(text, faction, turn));
    next
}

pub fn generate_random<R: RandomSource + ?Sized>(
    rng: &mut R,
    turn: u32,
    faction_filter: Option<&[Faction]>,
) -> Gossip {
    let (text, faction) = pick_template(GOSSIP_TEMPLATES, rng, faction_filter);
    Gossip::new(text, faction, turn)
}

/// Record a rumor on the snapshot, stamped with its current turn.
#[must_use]
pub fn add_gossip_to_state(
    state: &GameState,
    text: impl Into<String>,
    faction: Option<Faction>,
) -> Rc<GameState> {
    let mut next = state.clone();
    next.gossip_log = Some(add_entry(state.gossip_log.as_ref(), text, faction, state.turn));
    Rc::new(next)
}

pub fn add_random_gossip_to_state<R: RandomSource + ?Sized>(
    state: &GameState,
    rng: &mut R,
    faction_filter: Option<&[Faction]>,
) -> Rc<GameState> {
    let gossip = generate_random(rng, state.turn, faction_filter);
    log::trace!("overheard gossip from {}", gossip.source);
    add_gossip_to_state(state, gossip.text, gossip.faction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRolls};

    #[test]
    fn fresh_log_is_empty_with_capacity_fifty() {
        let log = initialize_log();
        assert!(log.entries.is_empty());
        assert_eq!(log.max_entries, 50);
    }

    #[test]
    fn add_entry_prepends_and_attributes_source() {
        let log = add_entry(None, "first", None, 3);
        let log = add_entry(Some(&log), "second", Some(Faction::Merchant), 4);
        assert_eq!(log.len(), 2);
        let newest = log.newest().unwrap();
        assert_eq!(newest.text, "second");
        assert_eq!(newest.source, "merchant informant");
        assert_eq!(newest.turn, 4);
        assert_eq!(newest.generation, 1);
        assert_eq!(log.entries[1].source, "traveler");
        assert_ne!(log.entries[0].id, log.entries[1].id);
        assert!(log.entries[0].id.starts_with("gossip-"));
    }

    #[test]
    fn overflowing_log_evicts_oldest() {
        let mut log = initialize_log();
        for n in 0..=50 {
            log = add_entry(Some(&log), format!("rumor {n}"), None, n);
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.entries[0].text, "rumor 50");
        assert!(log.entries.iter().all(|g| g.text != "rumor 0"));
    }

    #[test]
    fn filter_restricts_faction() {
        let mut rng = GameRng::from_user_seed(7);
        for _ in 0..20 {
            let gossip = generate_random(&mut rng, 10, Some(&[Faction::Hermit]));
            assert_eq!(gossip.faction, Some(Faction::Hermit));
            assert_eq!(gossip.source, "hermit informant");
            assert_eq!(gossip.turn, 10);
        }
    }

    #[test]
    fn unfiltered_gossip_uses_template_factions() {
        let mut rng = ScriptedRolls::new(vec![0.25, 0.0]);
        let gossip = generate_random(&mut rng, 2, None);
        assert_eq!(gossip.text, GOSSIP_TEMPLATES[2].text);
        assert_eq!(gossip.faction, Some(Faction::Merchant));
    }

    #[test]
    fn state_helpers_stamp_current_turn() {
        let mut state = GameState::default();
        state.turn = 12;
        assert!(state.gossip_log.is_none());
        let next = add_gossip_to_state(&state, "whispers", Some(Faction::Scholar));
        let log = next.gossip_log.as_ref().unwrap();
        assert_eq!(log.entries[0].turn, 12);
        assert!(state.gossip_log.is_none());

        let mut rng = ScriptedRolls::constant(0.0);
        let again = add_random_gossip_to_state(&next, &mut rng, None);
        let log = again.gossip_log.as_ref().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries[0].text, GOSSIP_TEMPLATES[0].text);
        assert_eq!(log.entries[0].faction, Some(Faction::Explorer));
    }
}
