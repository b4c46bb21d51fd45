//! Season cycle and the environmental pressure each season applies.
//!
//! Seasons advance spring → summer → autumn → winter → spring. The breeding
//! bonus is exposed for callers but is not folded into trait inheritance odds.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::config::ConfigError;
use crate::constants::{
    DEFAULT_SEASON_DURATION_TURNS, SPRING_BREEDING_BONUS, WINTER_BREEDING_PENALTY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeasonName {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl SeasonName {
    pub const CYCLE: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for SeasonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Cold,
    Mild,
    Hot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirCurrents {
    Calm,
    Moderate,
    Turbulent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalPressure {
    pub temperature: Temperature,
    pub air_currents: AirCurrents,
    /// Signed adjustment to breeding success; absent means neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breeding_success_bonus: Option<f64>,
}

impl EnvironmentalPressure {
    #[must_use]
    pub fn bonus_or_neutral(&self) -> f64 {
        self.breeding_success_bonus.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    pub name: SeasonName,
    pub duration_turns: u32,
    pub environmental_pressure: EnvironmentalPressure,
}

/// Where the cycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonState {
    pub current_season: SeasonName,
    pub turn_in_season: u32,
    pub total_turns_in_cycle: u32,
}

impl SeasonState {
    /// Jump to the start of the next season regardless of remaining turns.
    #[must_use]
    pub const fn advance_season(self) -> Self {
        Self {
            current_season: self.current_season.next(),
            turn_in_season: 0,
            total_turns_in_cycle: self.total_turns_in_cycle,
        }
    }
}

impl Default for SeasonState {
    fn default() -> Self {
        default_calendar().initial_state()
    }
}

/// Per-season configuration for a full cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    #[serde(default = "SeasonCalendar::default_spring")]
    pub spring: SeasonConfig,
    #[serde(default = "SeasonCalendar::default_summer")]
    pub summer: SeasonConfig,
    #[serde(default = "SeasonCalendar::default_autumn")]
    pub autumn: SeasonConfig,
    #[serde(default = "SeasonCalendar::default_winter")]
    pub winter: SeasonConfig,
}

impl SeasonCalendar {
    const fn default_spring() -> SeasonConfig {
        SeasonConfig {
            name: SeasonName::Spring,
            duration_turns: DEFAULT_SEASON_DURATION_TURNS,
            environmental_pressure: EnvironmentalPressure {
                temperature: Temperature::Mild,
                air_currents: AirCurrents::Moderate,
                breeding_success_bonus: Some(SPRING_BREEDING_BONUS),
            },
        }
    }

    const fn default_summer() -> SeasonConfig {
        SeasonConfig {
            name: SeasonName::Summer,
            duration_turns: DEFAULT_SEASON_DURATION_TURNS,
            environmental_pressure: EnvironmentalPressure {
                temperature: Temperature::Hot,
                air_currents: AirCurrents::Moderate,
                breeding_success_bonus: None,
            },
        }
    }

    const fn default_autumn() -> SeasonConfig {
        SeasonConfig {
            name: SeasonName::Autumn,
            duration_turns: DEFAULT_SEASON_DURATION_TURNS,
            environmental_pressure: EnvironmentalPressure {
                temperature: Temperature::Mild,
                air_currents: AirCurrents::Turbulent,
                breeding_success_bonus: None,
            },
        }
    }

    const fn default_winter() -> SeasonConfig {
        SeasonConfig {
            name: SeasonName::Winter,
            duration_turns: DEFAULT_SEASON_DURATION_TURNS,
            environmental_pressure: EnvironmentalPressure {
                temperature: Temperature::Cold,
                air_currents: AirCurrents::Calm,
                breeding_success_bonus: Some(WINTER_BREEDING_PENALTY),
            },
        }
    }

    #[must_use]
    pub const fn season_config(&self, season: SeasonName) -> &SeasonConfig {
        match season {
            SeasonName::Spring => &self.spring,
            SeasonName::Summer => &self.summer,
            SeasonName::Autumn => &self.autumn,
            SeasonName::Winter => &self.winter,
        }
    }

    /// Sum of every season's duration.
    #[must_use]
    pub fn cycle_length(&self) -> u32 {
        SeasonName::CYCLE
            .iter()
            .map(|season| self.season_config(*season).duration_turns)
            .fold(0_u32, u32::saturating_add)
    }

    #[must_use]
    pub fn initial_state(&self) -> SeasonState {
        SeasonState {
            current_season: SeasonName::Spring,
            turn_in_season: 0,
            total_turns_in_cycle: self.cycle_length(),
        }
    }

    /// Count one turn. Reaching the season's duration rolls over into the next
    /// season at turn 0 instead of recording the increment.
    #[must_use]
    pub fn advance_turn(&self, state: SeasonState) -> SeasonState {
        let next_turn = state.turn_in_season.saturating_add(1);
        let duration = self.season_config(state.current_season).duration_turns;
        if next_turn >= duration {
            let next = state.advance_season();
            log::debug!(
                "season turned from {} to {}",
                state.current_season,
                next.current_season
            );
            return next;
        }
        SeasonState {
            turn_in_season: next_turn,
            ..state
        }
    }

    #[must_use]
    pub const fn current_environmental_pressure(
        &self,
        state: &SeasonState,
    ) -> &EnvironmentalPressure {
        &self.season_config(state.current_season).environmental_pressure
    }

    #[must_use]
    pub fn is_breeding_bonus_season(&self, state: &SeasonState) -> bool {
        self.current_environmental_pressure(state).bonus_or_neutral() > 0.0
    }

    #[must_use]
    pub fn is_breeding_penalty_season(&self, state: &SeasonState) -> bool {
        self.current_environmental_pressure(state).bonus_or_neutral() < 0.0
    }

    /// Validate calendar completeness.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a season is filed under the wrong slot, lasts
    /// zero turns, or carries a non-finite breeding bonus.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for season in SeasonName::CYCLE {
            let config = self.season_config(season);
            if config.name != season {
                return Err(ConfigError::SeasonMismatch {
                    slot: season,
                    found: config.name,
                });
            }
            if config.duration_turns == 0 {
                return Err(ConfigError::EmptySeason { season });
            }
            if config
                .environmental_pressure
                .breeding_success_bonus
                .is_some_and(|bonus| !bonus.is_finite())
            {
                return Err(ConfigError::NonFinite {
                    field: "seasons.breeding_success_bonus",
                });
            }
        }
        Ok(())
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self {
            spring: Self::default_spring(),
            summer: Self::default_summer(),
            autumn: Self::default_autumn(),
            winter: Self::default_winter(),
        }
    }
}

/// Shared default calendar used by the free-function lookups.
#[must_use]
pub fn default_calendar() -> &'static SeasonCalendar {
    static CALENDAR: OnceLock<SeasonCalendar> = OnceLock::new();
    CALENDAR.get_or_init(SeasonCalendar::default)
}

#[must_use]
pub fn initialize_season_state() -> SeasonState {
    default_calendar().initial_state()
}

#[must_use]
pub fn advance_turn(state: SeasonState) -> SeasonState {
    default_calendar().advance_turn(state)
}

#[must_use]
pub const fn advance_season(state: SeasonState) -> SeasonState {
    state.advance_season()
}

#[must_use]
pub fn current_environmental_pressure(state: &SeasonState) -> EnvironmentalPressure {
    *default_calendar().current_environmental_pressure(state)
}

#[must_use]
pub fn season_config(season: SeasonName) -> SeasonConfig {
    *default_calendar().season_config(season)
}

#[must_use]
pub fn is_breeding_bonus_season(state: &SeasonState) -> bool {
    default_calendar().is_breeding_bonus_season(state)
}

#[must_use]
pub fn is_breeding_penalty_season(state: &SeasonState) -> bool {
    default_calendar().is_breeding_penalty_season(state)
}

/// Partial season state applied over the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeasonStateOverlay {
    #[serde(default)]
    pub current_season: Option<SeasonName>,
    #[serde(default)]
    pub turn_in_season: Option<u32>,
    #[serde(default)]
    pub total_turns_in_cycle: Option<u32>,
}

/// A calendar bundled with the state it is driving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSystem {
    pub config: SeasonCalendar,
    pub current_state: SeasonState,
}

impl SeasonSystem {
    #[must_use]
    pub fn advance_turn(&self) -> Self {
        Self {
            config: self.config.clone(),
            current_state: self.config.advance_turn(self.current_state),
        }
    }
}

/// Default calendar with `overlay` applied to its initial state.
#[must_use]
pub fn create_season_system(overlay: SeasonStateOverlay) -> SeasonSystem {
    let config = SeasonCalendar::default();
    let initial = config.initial_state();
    let current_state = SeasonState {
        current_season: overlay.current_season.unwrap_or(initial.current_season),
        turn_in_season: overlay.turn_in_season.unwrap_or(initial.turn_in_season),
        total_turns_in_cycle: overlay
            .total_turns_in_cycle
            .unwrap_or(initial.total_turns_in_cycle),
    };
    SeasonSystem {
        config,
        current_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_starts_in_spring() {
        let state = initialize_season_state();
        assert_eq!(state.current_season, SeasonName::Spring);
        assert_eq!(state.turn_in_season, 0);
        assert_eq!(state.total_turns_in_cycle, 80);
    }

    #[test]
    fn advance_turn_increments_within_season() {
        let state = advance_turn(initialize_season_state());
        assert_eq!(state.current_season, SeasonName::Spring);
        assert_eq!(state.turn_in_season, 1);
    }

    #[test]
    fn duration_turns_roll_into_next_season() {
        let mut state = initialize_season_state();
        for _ in 0..19 {
            state = advance_turn(state);
        }
        assert_eq!(state.current_season, SeasonName::Spring);
        assert_eq!(state.turn_in_season, 19);
        state = advance_turn(state);
        assert_eq!(state.current_season, SeasonName::Summer);
        assert_eq!(state.turn_in_season, 0);
    }

    #[test]
    fn full_cycle_returns_to_spring() {
        let start = initialize_season_state();
        let mut state = start;
        for _ in 0..80 {
            state = advance_turn(state);
            assert!(state.turn_in_season < season_config(state.current_season).duration_turns);
        }
        assert_eq!(state, start);
    }

    #[test]
    fn advance_season_wraps_winter_to_spring() {
        let winter = SeasonState {
            current_season: SeasonName::Winter,
            turn_in_season: 7,
            total_turns_in_cycle: 80,
        };
        let next = advance_season(winter);
        assert_eq!(next.current_season, SeasonName::Spring);
        assert_eq!(next.turn_in_season, 0);
        assert_eq!(next.total_turns_in_cycle, 80);
    }

    #[test]
    fn overfull_state_rolls_over_on_next_turn() {
        let stale = SeasonState {
            current_season: SeasonName::Autumn,
            turn_in_season: 45,
            total_turns_in_cycle: 80,
        };
        let next = advance_turn(stale);
        assert_eq!(next.current_season, SeasonName::Winter);
        assert_eq!(next.turn_in_season, 0);
    }

    #[test]
    fn breeding_pressure_classification() {
        let mut state = initialize_season_state();
        assert!(is_breeding_bonus_season(&state));
        assert!(!is_breeding_penalty_season(&state));

        state = advance_season(state);
        assert!(!is_breeding_bonus_season(&state));
        assert!(!is_breeding_penalty_season(&state));

        state = advance_season(advance_season(state));
        assert_eq!(state.current_season, SeasonName::Winter);
        assert!(is_breeding_penalty_season(&state));
        let pressure = current_environmental_pressure(&state);
        assert_eq!(pressure.temperature, Temperature::Cold);
        assert_eq!(pressure.air_currents, AirCurrents::Calm);
    }

    #[test]
    fn custom_durations_change_cycle_length() {
        let mut calendar = SeasonCalendar::default();
        calendar.summer.duration_turns = 2;
        assert_eq!(calendar.cycle_length(), 62);
        let summer = SeasonState {
            current_season: SeasonName::Summer,
            turn_in_season: 1,
            total_turns_in_cycle: 62,
        };
        assert_eq!(
            calendar.advance_turn(summer).current_season,
            SeasonName::Autumn
        );
    }

    #[test]
    fn validation_rejects_empty_and_misfiled_seasons() {
        let mut calendar = SeasonCalendar::default();
        assert!(calendar.validate().is_ok());
        calendar.autumn.duration_turns = 0;
        assert_eq!(
            calendar.validate(),
            Err(ConfigError::EmptySeason {
                season: SeasonName::Autumn
            })
        );

        let mut misfiled = SeasonCalendar::default();
        misfiled.winter.name = SeasonName::Summer;
        assert!(matches!(
            misfiled.validate(),
            Err(ConfigError::SeasonMismatch { .. })
        ));
    }

    #[test]
    fn season_system_applies_overlay() {
        let system = create_season_system(SeasonStateOverlay {
            current_season: Some(SeasonName::Winter),
            turn_in_season: Some(19),
            total_turns_in_cycle: None,
        });
        assert_eq!(system.current_state.total_turns_in_cycle, 80);
        let next = system.advance_turn();
        assert_eq!(next.current_state.current_season, SeasonName::Spring);
        assert_eq!(next.current_state.turn_in_season, 0);

        let untouched = create_season_system(SeasonStateOverlay::default());
        assert_eq!(untouched.current_state, initialize_season_state());
    }

    #[test]
    fn partial_calendar_json_fills_defaults() {
        let calendar: SeasonCalendar = serde_json::from_str(
            r#"{"winter":{"name":"winter","duration_turns":5,"environmental_pressure":{"temperature":"cold","air_currents":"calm"}}}"#,
        )
        .unwrap();
        assert_eq!(calendar.winter.duration_turns, 5);
        assert!(calendar.winter.environmental_pressure.breeding_success_bonus.is_none());
        assert_eq!(calendar.spring, SeasonCalendar::default().spring);
        assert_eq!(calendar.cycle_length(), 65);
    }
}
