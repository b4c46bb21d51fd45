//! Flavor text generators and the bounded logs that hold their output.
pub mod evolution;
pub mod gossip;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_LOG_CAPACITY;
use crate::rng::RandomSource;

/// Narrative affiliation attached to generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Merchant,
    Explorer,
    Scholar,
    Hermit,
}

impl Faction {
    pub const ALL: [Self; 4] = [Self::Merchant, Self::Explorer, Self::Scholar, Self::Hermit];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Merchant => "merchant",
            Self::Explorer => "explorer",
            Self::Scholar => "scholar",
            Self::Hermit => "hermit",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A line of flavor text and the factions allowed to voice it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeTemplate {
    pub text: &'static str,
    pub factions: &'static [Faction],
}

/// Newest-first log that evicts its oldest entries past `max_entries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingLog<E> {
    pub entries: Vec<E>,
    #[serde(default = "default_capacity")]
    pub max_entries: usize,
}

const fn default_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

impl<E> RollingLog<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    #[must_use]
    pub const fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Prepend `entry`, dropping whatever falls past the capacity.
    pub fn push_newest(&mut self, entry: E) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_entries);
    }

    #[must_use]
    pub fn newest(&self) -> Option<&E> {
        self.entries.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for RollingLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a template, then a faction from `filter` when it names any, otherwise
/// from the template's own list.
pub(crate) fn pick_template<R: RandomSource + ?Sized>(
    templates: &'static [NarrativeTemplate],
    rng: &mut R,
    filter: Option<&[Faction]>,
) -> (&'static str, Option<Faction>) {
    if templates.is_empty() {
        return ("", None);
    }
    let template = &templates[rng.pick_index(templates.len())];
    let factions = match filter {
        Some(filter) if !filter.is_empty() => filter,
        _ => template.factions,
    };
    if factions.is_empty() {
        return (template.text, None);
    }
    let faction = factions[rng.pick_index(factions.len())];
    (template.text, Some(faction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;

    const TEMPLATES: &[NarrativeTemplate] = &[
        NarrativeTemplate {
            text: "first",
            factions: &[Faction::Merchant],
        },
        NarrativeTemplate {
            text: "second",
            factions: &[Faction::Scholar, Faction::Hermit],
        },
    ];

    #[test]
    fn rolling_log_keeps_newest_first_within_capacity() {
        let mut log = RollingLog::with_capacity(3);
        for n in 0..5 {
            log.push_newest(n);
        }
        assert_eq!(log.entries, vec![4, 3, 2]);
        assert_eq!(log.newest(), Some(&4));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn default_capacity_is_fifty() {
        let log: RollingLog<u8> = RollingLog::default();
        assert_eq!(log.max_entries, 50);
        assert!(log.is_empty());
    }

    #[test]
    fn zero_capacity_log_stays_empty() {
        let mut log = RollingLog::with_capacity(0);
        log.push_newest("ignored");
        assert!(log.is_empty());
    }

    #[test]
    fn template_factions_used_without_filter() {
        let mut rng = ScriptedRolls::new(vec![0.9, 0.9]);
        assert_eq!(
            pick_template(TEMPLATES, &mut rng, None),
            ("second", Some(Faction::Hermit))
        );
    }

    #[test]
    fn empty_filter_falls_back_to_template() {
        let mut rng = ScriptedRolls::constant(0.0);
        assert_eq!(
            pick_template(TEMPLATES, &mut rng, Some(&[])),
            ("first", Some(Faction::Merchant))
        );
        assert_eq!(
            pick_template(TEMPLATES, &mut rng, Some(&[Faction::Explorer])),
            ("first", Some(Faction::Explorer))
        );
    }

    #[test]
    fn factions_round_trip_lowercase() {
        let json = serde_json::to_string(&Faction::Hermit).unwrap();
        assert_eq!(json, "\"hermit\"");
        assert_eq!(Faction::Scholar.to_string(), "scholar");
    }
}
