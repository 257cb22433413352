//! Player and game state owned by the turn controller.

use serde::Serialize;
use thiserror::Error;

use crate::constants::limits::*;
use crate::port::{Commodity, Port};
use crate::rules::UpgradeOffer;
use crate::ship::Ship;
use crate::snapshot::{GameSummary, TransactionReport, UpgradeReport};
use crate::trade::{self, TradeKind};
use crate::weather::Weather;

/// Values chosen by the player before the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Setup {
    pub merchant_id: u16,
    pub initial_balance: u64,
    pub profit_target: u32,
}

/// Setup validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Please only enter an integer within the range of {MIN_MERCHANT_ID} - {MAX_MERCHANT_ID}!")]
    MerchantIdOutOfRange(u16),
    #[error("Please only enter an integer greater than 0!")]
    InitialBalanceTooLow(u64),
    #[error("Please only enter an integer less than or equal to {MAX_INITIAL_BALANCE}!")]
    InitialBalanceTooHigh(u64),
    #[error("Please only enter an integer greater than or equal to {MIN_PROFIT_TARGET}!")]
    ProfitTargetTooLow(u32),
}

pub fn check_merchant_id(id: u16) -> Result<(), SetupError> {
    if (MIN_MERCHANT_ID..=MAX_MERCHANT_ID).contains(&id) {
        Ok(())
    } else {
        Err(SetupError::MerchantIdOutOfRange(id))
    }
}

pub fn check_initial_balance(balance: u64) -> Result<(), SetupError> {
    if balance < MIN_INITIAL_BALANCE {
        Err(SetupError::InitialBalanceTooLow(balance))
    } else if balance > MAX_INITIAL_BALANCE {
        Err(SetupError::InitialBalanceTooHigh(balance))
    } else {
        Ok(())
    }
}

pub fn check_profit_target(target: u32) -> Result<(), SetupError> {
    if target >= MIN_PROFIT_TARGET {
        Ok(())
    } else {
        Err(SetupError::ProfitTargetTooLow(target))
    }
}

/// Validate a setup, returning all errors found.
pub fn validate_setup(setup: &Setup) -> Vec<SetupError> {
    [
        check_merchant_id(setup.merchant_id),
        check_initial_balance(setup.initial_balance),
        check_profit_target(setup.profit_target),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// Profit as a whole percentage of the initial balance.
///
/// Computed as a real ratio and truncated toward zero, so a 0.9% loss
/// reads as 0 and a 10.9% gain as 10.
pub fn profit_percent(balance: u64, initial_balance: u64) -> i64 {
    let gain = balance as f64 - initial_balance as f64;
    (gain / initial_balance as f64 * 100.0) as i64
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub merchant_id: u16,
    pub balance: u64,
    pub initial_balance: u64,
    pub profit_target: u32,
    pub turns_exhausted: u32,
    pub port: Port,
}

impl Player {
    pub fn profit_percent(&self) -> i64 {
        profit_percent(self.balance, self.initial_balance)
    }

    pub fn has_reached_target(&self) -> bool {
        self.profit_percent() >= self.profit_target as i64
    }
}

/// Everything that changes over a session.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub player: Player,
    pub ship: Ship,
    pub weather: Weather,
}

impl GameState {
    /// Start a new game docked at Manila with an empty tier-one ship.
    ///
    /// # Panics
    ///
    /// If `setup` fails [`validate_setup`].
    pub fn new(setup: Setup) -> Self {
        let errors = validate_setup(&setup);
        assert!(errors.is_empty(), "invalid setup: {:?}", errors);
        Self {
            player: Player {
                merchant_id: setup.merchant_id,
                balance: setup.initial_balance,
                initial_balance: setup.initial_balance,
                profit_target: setup.profit_target,
                turns_exhausted: 0,
                port: Port::STARTING,
            },
            ship: Ship::new(),
            weather: Weather::new(),
        }
    }

    pub fn is_turn_budget_exhausted(&self) -> bool {
        self.player.turns_exhausted >= TURN_BUDGET
    }

    /// Run a checked transaction through the trade engine.
    ///
    /// # Panics
    ///
    /// If the transaction would overfill the hold or break a trade engine
    /// precondition.
    pub fn apply_trade(
        &mut self,
        kind: TradeKind,
        commodity: Commodity,
        quantity: u32,
        unit_price: u32,
    ) -> TransactionReport {
        if kind == TradeKind::Buy {
            assert!(
                quantity <= self.ship.free_space(),
                "buying {} would overfill the hold",
                quantity
            );
        }
        let (balance, amount) = trade::trade(
            kind,
            unit_price,
            quantity,
            self.player.balance,
            self.ship.cargo.amount(commodity),
        );
        self.player.balance = balance;
        self.ship.cargo.set_amount(commodity, amount);
        log::debug!(
            "{} {} {} at {} -> balance {}",
            kind.verb(),
            quantity,
            commodity.plural_name(),
            unit_price,
            balance
        );
        TransactionReport {
            kind,
            commodity,
            quantity,
            unit_price,
            total: unit_price as u64 * quantity as u64,
        }
    }

    /// Pay for `offer` and move the ship up one tier.
    ///
    /// # Panics
    ///
    /// If the offer was made for a different tier than the ship's.
    pub fn apply_upgrade(&mut self, offer: &UpgradeOffer) -> UpgradeReport {
        assert_eq!(offer.current_tier, self.ship.tier, "stale upgrade offer");
        let (balance, limit) =
            trade::upgrade_ship(self.player.balance, offer.cost, offer.new_cargo_limit);
        self.player.balance = balance;
        self.ship.tier = offer.next_tier;
        log::debug!(
            "ship upgraded to tier {} ({} cargo) for {}",
            offer.next_tier.number(),
            limit,
            offer.cost
        );
        UpgradeReport {
            new_tier: offer.next_tier.number(),
            cargo_limit_increase: offer.cargo_limit_increase(),
            new_cargo_limit: limit,
            cost: offer.cost,
        }
    }

    pub fn summary(&self, quit: bool) -> GameSummary {
        GameSummary {
            final_profit_percent: self.player.profit_percent(),
            profit_target: self.player.profit_target,
            final_balance: self.player.balance,
            initial_balance: self.player.initial_balance,
            turns_used: self.player.turns_exhausted,
            won: self.player.has_reached_target(),
            quit,
        }
    }
}
