//! Aether mist production and the waystation trade desk.
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;

use crate::config::ConfigError;
use crate::constants::{
    CAPACITY_RATING_BONUS, DEFAULT_BASE_PRODUCTION, DEFAULT_BUY_PRICE_PER_UNIT,
    DEFAULT_CONSUMPTION_PENALTY, DEFAULT_EFFICIENCY_BONUS, DEFAULT_GENERATION_MULTIPLIER,
    DEFAULT_SELL_PRICE_PER_UNIT, RESILIENCE_RATING_BONUS,
};
use crate::numbers::{floor_f64_to_i64, i64_to_f64};
use crate::state::{GameState, TradeInventory};
use crate::whale::{Whale, WhaleTrait};

/// Per-turn production tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AetherMistConfig {
    #[serde(default = "AetherMistConfig::default_base_production")]
    pub base_production: f64,
    #[serde(default = "AetherMistConfig::default_generation_multiplier")]
    pub generation_multiplier: f64,
    #[serde(default = "AetherMistConfig::default_efficiency_bonus")]
    pub efficiency_bonus: f64,
    /// Subtracted from the multiplier of whales carrying `consumption`.
    #[serde(default = "AetherMistConfig::default_consumption_penalty")]
    pub consumption_penalty: f64,
}

impl AetherMistConfig {
    const fn default_base_production() -> f64 {
        DEFAULT_BASE_PRODUCTION
    }

    const fn default_generation_multiplier() -> f64 {
        DEFAULT_GENERATION_MULTIPLIER
    }

    const fn default_efficiency_bonus() -> f64 {
        DEFAULT_EFFICIENCY_BONUS
    }

    const fn default_consumption_penalty() -> f64 {
        DEFAULT_CONSUMPTION_PENALTY
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("aether_mist.base_production", self.base_production),
            ("aether_mist.generation_multiplier", self.generation_multiplier),
            ("aether_mist.efficiency_bonus", self.efficiency_bonus),
            ("aether_mist.consumption_penalty", self.consumption_penalty),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.consumption_penalty > 1.0 {
            return Err(ConfigError::NegativeMultiplier {
                penalty: self.consumption_penalty,
            });
        }
        Ok(())
    }
}

impl Default for AetherMistConfig {
    fn default() -> Self {
        Self {
            base_production: Self::default_base_production(),
            generation_multiplier: Self::default_generation_multiplier(),
            efficiency_bonus: Self::default_efficiency_bonus(),
            consumption_penalty: Self::default_consumption_penalty(),
        }
    }
}

/// Waystation exchange rates between fleet mist and the trading stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeConfig {
    #[serde(default = "TradeConfig::default_buy_price")]
    pub buy_price_per_unit: i64,
    #[serde(default = "TradeConfig::default_sell_price")]
    pub sell_price_per_unit: i64,
}

impl TradeConfig {
    const fn default_buy_price() -> i64 {
        DEFAULT_BUY_PRICE_PER_UNIT
    }

    const fn default_sell_price() -> i64 {
        DEFAULT_SELL_PRICE_PER_UNIT
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("trade.buy_price_per_unit", self.buy_price_per_unit),
            ("trade.sell_price_per_unit", self.sell_price_per_unit),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative {
                    field,
                    value: i64_to_f64(value),
                });
            }
        }
        Ok(())
    }
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            buy_price_per_unit: Self::default_buy_price(),
            sell_price_per_unit: Self::default_sell_price(),
        }
    }
}

/// Why a trade quote was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TradeError {
    #[error("trade amount must be positive (got {amount})")]
    NonPositiveAmount { amount: i64 },
    #[error("trade inventory holds {available}, purchase costs {required}")]
    InsufficientInventory { required: i64, available: i64 },
    #[error("fleet holds {available} aether mist, sale needs {required}")]
    InsufficientAetherMist { required: i64, available: i64 },
    #[error("trade value overflowed")]
    Overflow,
}

/// Balances a trade would leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub amount: i64,
    /// Trading stock spent (buy) or earned (sell).
    pub price: i64,
    pub aether_mist_after: i64,
    pub trade_inventory_after: i64,
}

/// Production of a single whale for one turn.
#[must_use]
pub fn whale_production(whale: &Whale, config: &AetherMistConfig) -> i64 {
    let generation = f64::from(whale.generation);
    let base = config.base_production + (generation * config.generation_multiplier).floor();
    let mut multiplier = 1.0;
    if whale.has_trait(WhaleTrait::Efficiency) {
        multiplier += config.efficiency_bonus;
    }
    if whale.has_trait(WhaleTrait::Consumption) {
        multiplier -= config.consumption_penalty;
    }
    floor_f64_to_i64(base * multiplier)
}

/// Fleet-wide aether mist delta for one turn.
#[must_use]
pub fn calculate_aether_mist_change(whales: &[Whale], config: &AetherMistConfig) -> i64 {
    whales
        .iter()
        .map(|whale| whale_production(whale, config))
        .fold(0_i64, i64::saturating_add)
}

/// Informational hauling rating; not part of the per-turn delta.
#[must_use]
pub fn production_rating(whale: &Whale) -> f64 {
    let mut rating = 1.0;
    if whale.has_trait(WhaleTrait::Capacity) {
        rating += CAPACITY_RATING_BONUS;
    }
    if whale.has_trait(WhaleTrait::Resilience) {
        rating += RESILIENCE_RATING_BONUS;
    }
    rating
}

/// Quote buying `amount` mist with trading stock.
///
/// # Errors
///
/// Fails for non-positive amounts, an overflowing cost, or a trading stock
/// smaller than the cost.
pub fn quote_buy(
    state: &GameState,
    amount: i64,
    config: &TradeConfig,
) -> Result<TradeReceipt, TradeError> {
    if amount <= 0 {
        return Err(TradeError::NonPositiveAmount { amount });
    }
    let cost = amount
        .checked_mul(config.buy_price_per_unit)
        .ok_or(TradeError::Overflow)?;
    let available = state.trade_inventory.aether_mist;
    if available < cost {
        return Err(TradeError::InsufficientInventory {
            required: cost,
            available,
        });
    }
    Ok(TradeReceipt {
        amount,
        price: cost,
        aether_mist_after: state
            .aether_mist
            .checked_add(amount)
            .ok_or(TradeError::Overflow)?,
        trade_inventory_after: available - cost,
    })
}

/// Quote selling `amount` fleet mist into the trading stock.
///
/// # Errors
///
/// Fails for non-positive amounts, insufficient fleet mist, or overflowing
/// proceeds.
pub fn quote_sell(
    state: &GameState,
    amount: i64,
    config: &TradeConfig,
) -> Result<TradeReceipt, TradeError> {
    if amount <= 0 {
        return Err(TradeError::NonPositiveAmount { amount });
    }
    let available = state.aether_mist;
    if available < amount {
        return Err(TradeError::InsufficientAetherMist {
            required: amount,
            available,
        });
    }
    let proceeds = amount
        .checked_mul(config.sell_price_per_unit)
        .ok_or(TradeError::Overflow)?;
    Ok(TradeReceipt {
        amount,
        price: proceeds,
        aether_mist_after: available - amount,
        trade_inventory_after: state
            .trade_inventory
            .aether_mist
            .checked_add(proceeds)
            .ok_or(TradeError::Overflow)?,
    })
}

fn settle(
    state: &Rc<GameState>,
    quote: Result<TradeReceipt, TradeError>,
    action: &str,
) -> Rc<GameState> {
    match quote {
        Ok(receipt) => {
            log::debug!(
                "{action} {} aether mist for {} trade stock",
                receipt.amount,
                receipt.price
            );
            let mut next = GameState::clone(state);
            next.aether_mist = receipt.aether_mist_after;
            next.trade_inventory = TradeInventory {
                aether_mist: receipt.trade_inventory_after,
            };
            Rc::new(next)
        }
        Err(err) => {
            log::debug!("{action} rejected: {err}");
            Rc::clone(state)
        }
    }
}

/// Buy mist at the waystation rate, or return `state` itself when refused.
#[must_use]
pub fn buy_aether_mist(state: &Rc<GameState>, amount: i64, config: &TradeConfig) -> Rc<GameState> {
    settle(state, quote_buy(state, amount, config), "bought")
}

/// Sell fleet mist at the waystation rate, or return `state` itself when refused.
#[must_use]
pub fn sell_aether_mist(state: &Rc<GameState>, amount: i64, config: &TradeConfig) -> Rc<GameState> {
    settle(state, quote_sell(state, amount, config), "sold")
}
